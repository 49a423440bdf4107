//! Scratchpad completion markers.
//!
//! The agent keeps free-form notes in a markdown scratchpad. The hooks only
//! look for a few marker phrases in it; the file is never written.

use crate::error::Result;
use std::io::ErrorKind;
use std::path::Path;

/// Markers that mean the agent considers the whole task finished.
const DONE_MARKERS: &[&str] = &["DONE", "COMPLETE"];

/// Markers that mean the test suite is green.
const TESTS_PASSING_MARKERS: &[&str] = &["TESTS PASSING", "ALL TESTS PASS"];

/// How marker phrases are matched against the scratchpad text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerMatch {
    /// Markers must appear in upper case.
    Exact,
    /// Markers match in any case.
    IgnoreCase,
}

/// What the scratchpad currently says.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScratchpadState {
    /// Whether the scratchpad file exists.
    pub exists: bool,
    /// Whether it contains `DONE` or `COMPLETE`.
    pub done: bool,
    /// Whether it contains `TESTS PASSING` or `ALL TESTS PASS`.
    pub tests_passing: bool,
}

impl ScratchpadState {
    /// Derive the state from scratchpad text.
    pub fn from_content(content: &str, matching: MarkerMatch) -> Self {
        let haystack = match matching {
            MarkerMatch::Exact => content.to_string(),
            MarkerMatch::IgnoreCase => content.to_uppercase(),
        };
        let contains_any = |markers: &[&str]| markers.iter().any(|m| haystack.contains(m));

        Self {
            exists: true,
            done: contains_any(DONE_MARKERS),
            tests_passing: contains_any(TESTS_PASSING_MARKERS),
        }
    }
}

/// Read the scratchpad at `path` and report its markers.
///
/// A missing file is not an error: it yields the all-false state.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn inspect_scratchpad(path: &Path, matching: MarkerMatch) -> Result<ScratchpadState> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(ScratchpadState::from_content(&String::from_utf8_lossy(&bytes), matching)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(ScratchpadState::default()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_pad(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("scratchpad.md");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_all_false() {
        let dir = TempDir::new().unwrap();
        let state =
            inspect_scratchpad(&dir.path().join("missing.md"), MarkerMatch::IgnoreCase).unwrap();
        assert_eq!(state, ScratchpadState::default());
    }

    #[test]
    fn test_done_marker_exact() {
        let dir = TempDir::new().unwrap();
        let path = write_pad(&dir, "# Status\n\nDONE\n");
        let state = inspect_scratchpad(&path, MarkerMatch::Exact).unwrap();
        assert!(state.exists);
        assert!(state.done);
        assert!(!state.tests_passing);
    }

    #[test]
    fn test_complete_marker_counts_as_done() {
        let state = ScratchpadState::from_content("Migration COMPLETE", MarkerMatch::Exact);
        assert!(state.done);
    }

    #[test]
    fn test_exact_match_ignores_lower_case() {
        let state = ScratchpadState::from_content("almost done, not complete", MarkerMatch::Exact);
        assert!(state.exists);
        assert!(!state.done);
    }

    #[test]
    fn test_ignore_case_matches_lower_case() {
        let state = ScratchpadState::from_content("task is done", MarkerMatch::IgnoreCase);
        assert!(state.done);
    }

    #[test]
    fn test_tests_passing_markers() {
        let state = ScratchpadState::from_content("tests passing on ci", MarkerMatch::IgnoreCase);
        assert!(state.tests_passing);
        assert!(!state.done);

        let state = ScratchpadState::from_content("All tests pass", MarkerMatch::IgnoreCase);
        assert!(state.tests_passing);
    }

    #[test]
    fn test_no_markers() {
        let dir = TempDir::new().unwrap();
        let path = write_pad(&dir, "- fix parser\n- 3 tests failing\n");
        let state = inspect_scratchpad(&path, MarkerMatch::IgnoreCase).unwrap();
        assert_eq!(state, ScratchpadState { exists: true, done: false, tests_passing: false });
    }

    #[test]
    fn test_invalid_utf8_read_lossily() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scratchpad.md");
        std::fs::write(&path, b"\xff\xfe DONE").unwrap();
        let state = inspect_scratchpad(&path, MarkerMatch::Exact).unwrap();
        assert!(state.done);
    }

    #[test]
    fn test_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(inspect_scratchpad(dir.path(), MarkerMatch::Exact).is_err());
    }
}
