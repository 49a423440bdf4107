//! CLI binary for `cursor_loop_hooks`.
//!
//! This binary is a thin wrapper that reads stdin and delegates to the library.

use std::io::{self, Read};
use std::process::ExitCode;

use clap::Parser;
use cursor_loop_hooks::cli::{self, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Only read stdin for commands that need it (avoids blocking on terminal)
    let stdin = if cli.command.needs_stdin() { read_stdin() } else { String::new() };

    let output = cli::run(cli.command, &stdin);

    for line in &output.stdout {
        println!("{line}");
    }
    for msg in &output.stderr {
        eprintln!("{msg}");
    }

    output.exit_code
}

fn read_stdin() -> String {
    let mut input = Vec::new();
    // A failed read leaves the input empty, which the hooks treat as a stop.
    if let Err(e) = io::stdin().read_to_end(&mut input) {
        eprintln!("Error reading stdin: {e}");
    }
    String::from_utf8_lossy(&input).into_owned()
}
