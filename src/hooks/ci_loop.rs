//! CI loop hook: keep the agent working until the pull request's checks pass.

use super::{guard_stop, iteration_context, parse_hook_input, Decision, HookInput, StopReason};
use crate::config::LoopConfig;
use crate::error::Result;
use crate::github::{fetch_pr_status, CheckSummary, PrStatus};
use crate::scratchpad::{inspect_scratchpad, MarkerMatch};
use crate::templates;
use crate::traits::CommandRunner;

/// Run the CI loop hook on raw stdin.
pub fn run_ci_loop_hook(stdin: &str, config: &LoopConfig, runner: &dyn CommandRunner) -> Decision {
    Decision::or_fallback(
        parse_hook_input(stdin).and_then(|input| decide_ci_loop(&input, config, runner)),
    )
}

/// Decide whether the agent should keep fixing CI.
///
/// Priority order: loop guard, scratchpad, PR lookup, then the check summary.
///
/// # Errors
///
/// Returns an error if the scratchpad cannot be read or a message fails to render.
pub fn decide_ci_loop(
    input: &HookInput,
    config: &LoopConfig,
    runner: &dyn CommandRunner,
) -> Result<Decision> {
    if let Some(reason) = guard_stop(input, config) {
        return Ok(Decision::Stop(reason));
    }

    if inspect_scratchpad(&config.scratchpad(), MarkerMatch::Exact)?.done {
        return Ok(Decision::Stop(StopReason::ScratchpadDone));
    }

    let checks = match fetch_pr_status(runner) {
        PrStatus::NoPullRequest { detail } => {
            return Ok(Decision::Stop(StopReason::NoPullRequest(detail)))
        }
        PrStatus::Open { checks } => checks,
    };

    if checks.all_passed() {
        Ok(Decision::Stop(StopReason::ChecksPassed))
    } else if checks.failed > 0 {
        render_continue(templates::CI_FAILED, input, config, &checks)
    } else if checks.pending > 0 {
        render_continue(templates::CI_PENDING, input, config, &checks)
    } else {
        Ok(Decision::Stop(StopReason::NoChecks))
    }
}

fn render_continue(
    template: &str,
    input: &HookInput,
    config: &LoopConfig,
    checks: &CheckSummary,
) -> Result<Decision> {
    let mut ctx = iteration_context(input, config);
    ctx.insert("total", &checks.total);
    ctx.insert("passed", &checks.passed);
    ctx.insert("failed", &checks.failed);
    ctx.insert("pending", &checks.pending);
    ctx.insert("failed_checks", &checks.failed_checks);
    Ok(Decision::Continue(templates::render(template, &ctx)?))
}
