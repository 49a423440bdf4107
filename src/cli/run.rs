//! Command execution for the CLI.

use crate::cli::{Command, LoopArgs};
use crate::command::RealCommandRunner;
use crate::hook_logging;
use crate::hooks::{run_ci_loop_hook, run_test_loop_hook, Decision};
use crate::traits::CommandRunner;
use std::path::Path;
use std::process::ExitCode;

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Lines to print to stdout.
    pub stdout: Vec<String>,
    /// Lines to print to stderr.
    pub stderr: Vec<String>,
}

/// Run a CLI command in the current directory with the real `gh`.
pub fn run(command: Command, stdin: &str) -> CliOutput {
    run_in(command, stdin, &RealCommandRunner::new(), None)
}

/// Run a CLI command against an explicit runner and base directory.
///
/// `base_dir` of `None` means the current directory.
pub fn run_in(
    command: Command,
    stdin: &str,
    runner: &dyn CommandRunner,
    base_dir: Option<&Path>,
) -> CliOutput {
    let hook_type = command.hook_type();
    let decision = match command {
        Command::Version => return run_version(),
        Command::CiLoop(args) => run_ci_loop_cmd(&args, stdin, runner, base_dir),
        Command::TestLoop(args) => run_test_loop_cmd(&args, stdin, base_dir),
    };

    if let Some(hook_type) = hook_type {
        hook_logging::log_hook_event_in(
            hook_type,
            stdin,
            &decision,
            base_dir.unwrap_or_else(|| Path::new(".")),
        );
    }

    emit_decision(&decision)
}

fn run_version() -> CliOutput {
    CliOutput {
        exit_code: ExitCode::SUCCESS,
        stdout: vec![],
        stderr: vec![format!("cursor-loop-hooks v{}", crate::VERSION)],
    }
}

fn run_ci_loop_cmd(
    args: &LoopArgs,
    stdin: &str,
    runner: &dyn CommandRunner,
    base_dir: Option<&Path>,
) -> Decision {
    let config = args.to_config(base_dir.map(Path::to_path_buf));
    run_ci_loop_hook(stdin, &config, runner)
}

fn run_test_loop_cmd(args: &LoopArgs, stdin: &str, base_dir: Option<&Path>) -> Decision {
    let config = args.to_config(base_dir.map(Path::to_path_buf));
    run_test_loop_hook(stdin, &config)
}

/// Hooks always exit successfully with exactly one JSON line on stdout.
fn emit_decision(decision: &Decision) -> CliOutput {
    let line = decision.output().to_json().unwrap_or_else(|_| "{}".to_string());
    CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![line], stderr: vec![] }
}
