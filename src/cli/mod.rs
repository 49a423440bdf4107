//! Command-line interface for the loop hooks.
//!
//! The binary stays a thin wrapper: it parses arguments, reads stdin for hook
//! commands and prints whatever [`run`] returns.

mod run;


pub use run::{run, run_in, CliOutput};

use crate::config::{LoopConfig, MAX_ITERATIONS, SCRATCHPAD_PATH};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Stop hooks that keep a coding agent iterating until CI or tests pass.
///
/// Hook commands read the agent's status JSON on stdin and print a single
/// JSON decision on stdout: `{}` to stop, or `{"followup_message": ...}` to
/// send the agent around again.
#[derive(Parser, Debug)]
#[command(name = "cursor-loop-hooks")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by both loop hooks.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LoopArgs {
    /// Stop once the agent has looped this many times.
    #[arg(long, default_value_t = MAX_ITERATIONS)]
    pub max_iterations: u32,

    /// Scratchpad file checked for completion markers.
    #[arg(long, default_value = SCRATCHPAD_PATH)]
    pub scratchpad: PathBuf,
}

impl Default for LoopArgs {
    fn default() -> Self {
        Self { max_iterations: MAX_ITERATIONS, scratchpad: PathBuf::from(SCRATCHPAD_PATH) }
    }
}

impl LoopArgs {
    /// Build the hook configuration, resolving files against `base_dir`.
    pub fn to_config(&self, base_dir: Option<PathBuf>) -> LoopConfig {
        LoopConfig {
            max_iterations: self.max_iterations,
            scratchpad_path: self.scratchpad.clone(),
            base_dir,
        }
    }
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Keep the agent fixing CI until the pull request's checks pass
    /// (stdin: JSON hook input).
    #[command(name = "ci-loop")]
    CiLoop(LoopArgs),

    /// Keep the agent fixing tests until the scratchpad says they pass
    /// (stdin: JSON hook input).
    #[command(name = "test-loop")]
    TestLoop(LoopArgs),

    /// Show version information.
    Version,
}

impl Command {
    /// Returns true if this command requires stdin input.
    #[must_use]
    pub const fn needs_stdin(&self) -> bool {
        matches!(self, Self::CiLoop(_) | Self::TestLoop(_))
    }

    /// Returns the hook type name for logging, or None for non-hook commands.
    #[must_use]
    pub const fn hook_type(&self) -> Option<&'static str> {
        match self {
            Self::CiLoop(_) => Some("ci-loop"),
            Self::TestLoop(_) => Some("test-loop"),
            Self::Version => None,
        }
    }
}
