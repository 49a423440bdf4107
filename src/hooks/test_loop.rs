//! Test loop hook: keep the agent working until its tests pass.

use super::{guard_stop, iteration_context, parse_hook_input, Decision, HookInput, StopReason};
use crate::config::LoopConfig;
use crate::error::Result;
use crate::scratchpad::{inspect_scratchpad, MarkerMatch};
use crate::templates;

/// Rules file describing how planned test scenarios must be covered.
pub const TEST_SCENARIO_POLICY: &str = "rules/97-plan-test-scenarios.mdc";

/// Run the test loop hook on raw stdin.
pub fn run_test_loop_hook(stdin: &str, config: &LoopConfig) -> Decision {
    Decision::or_fallback(
        parse_hook_input(stdin).and_then(|input| decide_test_loop(&input, config)),
    )
}

/// Decide whether the agent should keep fixing tests.
///
/// Unless the loop guard or the scratchpad says otherwise, the answer is
/// always to continue.
///
/// # Errors
///
/// Returns an error if the scratchpad cannot be read or the message fails to render.
pub fn decide_test_loop(input: &HookInput, config: &LoopConfig) -> Result<Decision> {
    if let Some(reason) = guard_stop(input, config) {
        return Ok(Decision::Stop(reason));
    }

    let scratchpad = inspect_scratchpad(&config.scratchpad(), MarkerMatch::IgnoreCase)?;
    if scratchpad.done {
        return Ok(Decision::Stop(StopReason::ScratchpadDone));
    }
    if scratchpad.tests_passing {
        return Ok(Decision::Stop(StopReason::TestsPassing));
    }

    let mut ctx = iteration_context(input, config);
    ctx.insert("scenario_policy", TEST_SCENARIO_POLICY);
    ctx.insert("scratchpad", &config.scratchpad_path.display().to_string());
    Ok(Decision::Continue(templates::render(templates::TEST_LOOP, &ctx)?))
}
