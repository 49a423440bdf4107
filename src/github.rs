//! Pull-request check status via the `gh` CLI.
//!
//! Every way the lookup can go wrong (no repository, no PR for the branch,
//! `gh` not installed, non-zero exit, output that is not the expected JSON)
//! collapses into [`PrStatus::NoPullRequest`]. The underlying cause is kept
//! only as a detail string for the debug log.

use crate::error::{Error, Result};
use crate::traits::CommandRunner;
use serde::Deserialize;

/// Arguments for looking up the PR number of the current branch.
const PR_VIEW_ARGS: &[&str] = &["pr", "view", "--json", "number", "-q", ".number"];

/// Arguments for listing the PR's checks.
const PR_CHECKS_ARGS: &[&str] = &["pr", "checks", "--json", "name,state,conclusion"];

/// One CI check as reported by `gh pr checks --json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CheckRun {
    /// Check name.
    #[serde(default)]
    pub name: String,
    /// Lifecycle state (`PENDING`, `QUEUED`, `IN_PROGRESS`, `COMPLETED`, ...).
    #[serde(default)]
    pub state: Option<String>,
    /// Final outcome once finished (`SUCCESS`, `FAILURE`, `CANCELLED`, ...).
    #[serde(default)]
    pub conclusion: Option<String>,
}

impl CheckRun {
    fn is_failed(&self) -> bool {
        matches!(self.conclusion.as_deref(), Some("FAILURE" | "CANCELLED"))
    }

    fn is_pending(&self) -> bool {
        matches!(self.state.as_deref(), Some("PENDING" | "QUEUED" | "IN_PROGRESS"))
    }

    fn is_passed(&self) -> bool {
        self.conclusion.as_deref() == Some("SUCCESS")
    }
}

/// Counts of checks by outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckSummary {
    /// Number of checks reported.
    pub total: usize,
    /// Checks that concluded successfully.
    pub passed: usize,
    /// Checks that failed or were cancelled.
    pub failed: usize,
    /// Checks still pending, queued or running.
    pub pending: usize,
    /// Names of the failed checks, in reported order.
    pub failed_checks: Vec<String>,
}

impl CheckSummary {
    /// True iff there is at least one check and none failed or are pending.
    pub const fn all_passed(&self) -> bool {
        self.failed == 0 && self.pending == 0 && self.total > 0
    }
}

/// Pull-request status for the current working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrStatus {
    /// No usable PR was found.
    NoPullRequest {
        /// Why the lookup failed, when it failed rather than came back empty.
        detail: Option<String>,
    },
    /// An open PR and the summary of its checks.
    Open {
        /// Check counts.
        checks: CheckSummary,
    },
}

/// Classify a list of checks.
///
/// The three buckets are computed independently, so a malformed check can
/// land in more than one or in none.
pub fn summarize_checks(checks: &[CheckRun]) -> CheckSummary {
    let failed_checks: Vec<String> =
        checks.iter().filter(|c| c.is_failed()).map(|c| c.name.clone()).collect();

    CheckSummary {
        total: checks.len(),
        passed: checks.iter().filter(|c| c.is_passed()).count(),
        failed: failed_checks.len(),
        pending: checks.iter().filter(|c| c.is_pending()).count(),
        failed_checks,
    }
}

/// Fetch the PR status, folding every failure into `NoPullRequest`.
pub fn fetch_pr_status(runner: &dyn CommandRunner) -> PrStatus {
    query_pr_status(runner)
        .unwrap_or_else(|e| PrStatus::NoPullRequest { detail: Some(e.to_string()) })
}

/// Run a `gh` subcommand and return its stdout, failing on non-zero exit.
fn run_gh(runner: &dyn CommandRunner, args: &[&str]) -> Result<String> {
    let output = runner.run("gh", args)?;
    if !output.success() {
        return Err(Error::CommandFailed {
            command: format!("gh {}", args.join(" ")),
            exit_code: output.exit_code,
            stderr: output.stderr.trim().to_string(),
        });
    }
    Ok(output.stdout)
}

fn query_pr_status(runner: &dyn CommandRunner) -> Result<PrStatus> {
    if run_gh(runner, PR_VIEW_ARGS)?.trim().is_empty() {
        return Ok(PrStatus::NoPullRequest { detail: None });
    }

    let checks: Vec<CheckRun> = serde_json::from_str(&run_gh(runner, PR_CHECKS_ARGS)?)?;
    Ok(PrStatus::Open { checks: summarize_checks(&checks) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingCommandRunner, MockCommandRunner};
    use crate::traits::CommandOutput;

    fn check(name: &str, state: &str, conclusion: Option<&str>) -> CheckRun {
        CheckRun {
            name: name.to_string(),
            state: Some(state.to_string()),
            conclusion: conclusion.map(str::to_string),
        }
    }

    fn mock_pr(checks_json: &str) -> MockCommandRunner {
        let mut runner = MockCommandRunner::new();
        runner.expect("gh", PR_VIEW_ARGS, CommandOutput::ok("42\n"));
        runner.expect("gh", PR_CHECKS_ARGS, CommandOutput::ok(checks_json));
        runner
    }

    #[test]
    fn test_summarize_failed_and_passed() {
        let summary = summarize_checks(&[
            check("lint", "COMPLETED", Some("FAILURE")),
            check("test", "COMPLETED", Some("SUCCESS")),
        ]);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.pending, 0);
        assert_eq!(summary.failed_checks, vec!["lint".to_string()]);
        assert!(!summary.all_passed());
    }

    #[test]
    fn test_summarize_cancelled_counts_as_failed() {
        let summary = summarize_checks(&[check("deploy", "COMPLETED", Some("CANCELLED"))]);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failed_checks, vec!["deploy".to_string()]);
    }

    #[test]
    fn test_summarize_pending_states() {
        let summary = summarize_checks(&[
            check("a", "PENDING", None),
            check("b", "QUEUED", None),
            check("c", "IN_PROGRESS", None),
            check("d", "COMPLETED", Some("SUCCESS")),
        ]);
        assert_eq!(summary.pending, 3);
        assert_eq!(summary.passed, 1);
        assert!(!summary.all_passed());
    }

    #[test]
    fn test_summarize_all_passed() {
        let summary = summarize_checks(&[
            check("a", "COMPLETED", Some("SUCCESS")),
            check("b", "COMPLETED", Some("SUCCESS")),
        ]);
        assert!(summary.all_passed());
    }

    #[test]
    fn test_summarize_empty_is_not_all_passed() {
        let summary = summarize_checks(&[]);
        assert_eq!(summary, CheckSummary::default());
        assert!(!summary.all_passed());
    }

    #[test]
    fn test_summarize_matching_is_case_sensitive() {
        let summary = summarize_checks(&[check("a", "pending", Some("failure"))]);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.pending, 0);
        assert_eq!(summary.passed, 0);
        assert_eq!(summary.total, 1);
    }

    #[test]
    fn test_fetch_open_pr() {
        let runner = mock_pr(
            r#"[{"name":"build","state":"COMPLETED","conclusion":"SUCCESS"},
                {"name":"e2e","state":"IN_PROGRESS","conclusion":null}]"#,
        );
        let status = fetch_pr_status(&runner);
        runner.verify();

        let PrStatus::Open { checks } = status else {
            panic!("expected an open PR");
        };
        assert_eq!(checks.total, 2);
        assert_eq!(checks.passed, 1);
        assert_eq!(checks.pending, 1);
    }

    #[test]
    fn test_fetch_tolerates_missing_fields() {
        let runner = mock_pr(r#"[{"name":"build"}]"#);
        let PrStatus::Open { checks } = fetch_pr_status(&runner) else {
            panic!("expected an open PR");
        };
        assert_eq!(checks.total, 1);
        assert_eq!(checks.passed + checks.failed + checks.pending, 0);
    }

    #[test]
    fn test_fetch_pr_view_fails() {
        let mut runner = MockCommandRunner::new();
        runner.expect(
            "gh",
            PR_VIEW_ARGS,
            CommandOutput::failed(1, "no pull requests found for branch \"main\""),
        );
        let status = fetch_pr_status(&runner);
        runner.verify();

        let PrStatus::NoPullRequest { detail: Some(detail) } = status else {
            panic!("expected a failure detail");
        };
        assert!(detail.contains("no pull requests found"));
    }

    #[test]
    fn test_fetch_empty_pr_number() {
        let mut runner = MockCommandRunner::new();
        runner.expect("gh", PR_VIEW_ARGS, CommandOutput::ok("  \n"));
        assert_eq!(fetch_pr_status(&runner), PrStatus::NoPullRequest { detail: None });
        runner.verify();
    }

    #[test]
    fn test_fetch_checks_nonzero_exit() {
        let mut runner = MockCommandRunner::new();
        runner.expect("gh", PR_VIEW_ARGS, CommandOutput::ok("42\n"));
        runner.expect("gh", PR_CHECKS_ARGS, CommandOutput::failed(8, ""));
        assert!(matches!(fetch_pr_status(&runner), PrStatus::NoPullRequest { detail: Some(_) }));
    }

    #[test]
    fn test_fetch_checks_not_json() {
        let runner = mock_pr("Some checks were not successful");
        let status = fetch_pr_status(&runner);
        let PrStatus::NoPullRequest { detail: Some(detail) } = status else {
            panic!("expected a failure detail");
        };
        assert!(detail.starts_with("JSON error"));
    }

    #[test]
    fn test_fetch_gh_missing() {
        let runner = FailingCommandRunner::new("gh: command not found");
        assert!(matches!(fetch_pr_status(&runner), PrStatus::NoPullRequest { detail: Some(_) }));
    }
}
