//! # `cursor_loop_hooks`
//!
//! Stop hooks that decide, after a coding agent reports its turn finished,
//! whether it should keep iterating: until the pull request's CI checks pass
//! (`ci-loop`) or until its tests pass (`test-loop`).

#[cfg(feature = "cli")]
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod github;
pub mod hook_logging;
pub mod hooks;
pub mod scratchpad;
pub mod templates;
pub mod testing;
pub mod traits;

pub use command::RealCommandRunner;
pub use traits::{CommandOutput, CommandRunner};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
