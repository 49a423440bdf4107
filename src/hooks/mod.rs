//! Loop hooks invoked when the agent reports it has finished a turn.
//!
//! Both hooks share the same shape: parse the status payload, apply the loop
//! guard, consult the scratchpad, then decide. Any error on the way ends in
//! [`StopReason::Fallback`], which prints the same `{}` as a normal stop.

mod ci_loop;
mod test_loop;

pub use ci_loop::{decide_ci_loop, run_ci_loop_hook};
pub use test_loop::{decide_test_loop, run_test_loop_hook, TEST_SCENARIO_POLICY};

use crate::config::LoopConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tera::Context;

/// Status value meaning the agent's turn ended normally.
pub const STATUS_COMPLETED: &str = "completed";

/// Input provided to the hooks on stdin.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct HookInput {
    /// How the agent's last turn ended (`completed`, `aborted`, `error`, ...).
    #[serde(default)]
    pub status: Option<String>,
    /// Iterations already performed under this hook; absent or null means 0.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub loop_count: u32,
}

fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

/// Parse hook input from stdin.
///
/// # Errors
///
/// Returns an error if the input is empty or is not a JSON object of the
/// expected shape.
pub fn parse_hook_input(input: &str) -> Result<HookInput> {
    if input.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    let value: serde_json::Value = serde_json::from_str(input)?;
    if !value.is_object() {
        return Err(Error::InputNotObject);
    }
    Ok(serde_json::from_value(value)?)
}

/// The loop guard: may the agent be asked to go around again at all?
pub fn may_continue(input: &HookInput, max_iterations: u32) -> bool {
    input.status.as_deref() == Some(STATUS_COMPLETED) && input.loop_count < max_iterations
}

/// Stop reason when the loop guard refuses another iteration.
fn guard_stop(input: &HookInput, config: &LoopConfig) -> Option<StopReason> {
    if may_continue(input, config.max_iterations) {
        None
    } else if input.loop_count >= config.max_iterations {
        Some(StopReason::IterationLimit)
    } else {
        Some(StopReason::NotCompleted)
    }
}

/// Iteration numbers shown in follow-up messages.
fn iteration_context(input: &HookInput, config: &LoopConfig) -> Context {
    let mut ctx = Context::new();
    ctx.insert("iteration", &input.loop_count.saturating_add(1));
    ctx.insert("max_iterations", &config.max_iterations);
    ctx
}

/// Why a hook let the agent stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The turn did not end with `completed`.
    NotCompleted,
    /// `loop_count` reached the iteration ceiling.
    IterationLimit,
    /// The scratchpad says `DONE` or `COMPLETE`.
    ScratchpadDone,
    /// The scratchpad says the tests pass.
    TestsPassing,
    /// No pull request could be found; carries the swallowed failure, if any.
    NoPullRequest(Option<String>),
    /// Every check on the pull request passed.
    ChecksPassed,
    /// The pull request reported no checks.
    NoChecks,
    /// Evaluation failed; carries the error message.
    Fallback(String),
}

impl StopReason {
    /// Short machine-readable name, used in the event log.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NotCompleted => "not_completed",
            Self::IterationLimit => "iteration_limit",
            Self::ScratchpadDone => "scratchpad_done",
            Self::TestsPassing => "tests_passing",
            Self::NoPullRequest(_) => "no_pull_request",
            Self::ChecksPassed => "checks_passed",
            Self::NoChecks => "no_checks",
            Self::Fallback(_) => "fallback",
        }
    }

    /// Error text behind the stop, if it came from a failure.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::NoPullRequest(detail) => detail.as_deref(),
            Self::Fallback(message) => Some(message),
            _ => None,
        }
    }
}

/// The single decision a hook invocation makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Let the agent stop.
    Stop(StopReason),
    /// Keep going, with instructions for the next turn.
    Continue(String),
}

impl Decision {
    /// Fold an evaluation result into a decision; errors become the fallback stop.
    pub fn or_fallback(result: Result<Self>) -> Self {
        result.unwrap_or_else(|e| Self::Stop(StopReason::Fallback(e.to_string())))
    }

    /// Short machine-readable name, used in the event log.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Stop(reason) => reason.label(),
            Self::Continue(_) => "continue",
        }
    }

    /// The JSON payload written to stdout.
    pub fn output(&self) -> HookOutput {
        match self {
            Self::Stop(_) => HookOutput::default(),
            Self::Continue(message) => HookOutput { followup_message: Some(message.clone()) },
        }
    }
}

/// Output from a loop hook: `{}` to stop, or a follow-up message to continue.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct HookOutput {
    /// Instructions for the agent's next turn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followup_message: Option<String>,
}

impl HookOutput {
    /// Serialize to a single line of JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
