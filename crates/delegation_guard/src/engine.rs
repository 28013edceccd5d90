//! The delegation policy state machine.
//!
//! Given one hook event and the session's current state, [`evaluate`]
//! produces a [`Decision`] and the next state. Four concerns transition
//! together on the same record:
//!
//! - the streak counter and its power-of-two escalation policy,
//! - the block-once latch guarding the first solo call after a reset,
//! - the subagent reference count that suppresses the guard while a
//!   subagent is working,
//! - the grace window absorbing the spawn race.
//!
//! # The grace window
//!
//! A delegating call opens a one-call grace window. The parent and the
//! spawned subagent are independent processes sharing a session id, so the
//! engine cannot tell "the subagent just made its first call" from "the
//! parent kept working instead of waiting" — both arrive as identical
//! `PreToolUse` events until the subagent-start event lands. Whichever of
//! {the start event, the next ordinary call} arrives first claims the
//! window, so it is consumed exactly once. This ambiguity is an accepted
//! imprecision in the policy, not a bug.

use crate::event::{HookEventName, HookInput};
use crate::state::SessionDelegationState;
use crate::tools::{classify, ToolClass};

/// Outcome of evaluating one event
///
/// At most one of a block, an advisory, or silence is produced per event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Pass through with no output beyond `{}`
    Silent,
    /// Deny the tool call with a reason; the call does not run
    Block(String),
    /// Non-blocking context injected alongside the call
    Advise(String),
}

/// Apply one event to the session state and decide.
///
/// Mutates `state` in place; the caller persists it afterwards regardless of
/// the decision.
///
/// # Examples
///
/// ```
/// use delegation_guard::engine::{evaluate, Decision};
/// use delegation_guard::event::HookInput;
/// use delegation_guard::state::SessionDelegationState;
///
/// let input = HookInput::parse_lenient(
///     r#"{"hook_event_name": "PreToolUse", "session_id": "s", "tool_name": "Bash"}"#,
/// )
/// .unwrap();
/// let mut state = SessionDelegationState::default();
///
/// // First solo call in a fresh session is the one-time hard stop.
/// assert!(matches!(evaluate(&input, &mut state), Decision::Block(_)));
/// assert!(state.block_fired);
/// assert_eq!(state.streak, 0);
/// ```
pub fn evaluate(input: &HookInput, state: &mut SessionDelegationState) -> Decision {
    match input.hook_event_name {
        HookEventName::SubagentStart => {
            state.subagent_count = state.subagent_count.saturating_add(1);
            // Whichever of the start event and the subagent's first call
            // arrives first claims the grace window.
            state.subagent_grace = false;
            Decision::Silent
        }
        HookEventName::SubagentStop => {
            state.subagent_count = state.subagent_count.saturating_sub(1);
            Decision::Silent
        }
        HookEventName::PreToolUse => {
            let Some(tool_name) = input.tool_name.as_deref().filter(|name| !name.is_empty())
            else {
                // Missing tool name: pass through without touching state
                return Decision::Silent;
            };
            evaluate_tool_call(tool_name, state)
        }
    }
}

fn evaluate_tool_call(tool_name: &str, state: &mut SessionDelegationState) -> Decision {
    match classify(tool_name) {
        ToolClass::Delegating => {
            // Reset pressure, re-arm the latch, open the grace window.
            // subagent_count is preserved: stops for already-running
            // subagents must still balance their starts.
            state.streak = 0;
            state.block_fired = false;
            state.subagent_grace = true;
            Decision::Silent
        }
        ToolClass::Exempt => Decision::Silent,
        ToolClass::Ordinary => {
            if state.subagent_grace {
                state.subagent_grace = false;
                return Decision::Silent;
            }

            if state.subagent_count > 0 {
                // The session is actively delegating; no pressure accrues.
                return Decision::Silent;
            }

            if !state.block_fired {
                // One-time hard stop. The blocked call never executes, so
                // it does not count toward the streak.
                state.block_fired = true;
                return Decision::Block(block_message());
            }

            state.streak = state.streak.saturating_add(1);
            if is_escalation_point(state.streak) {
                Decision::Advise(advisory_message(state.streak))
            } else {
                Decision::Silent
            }
        }
    }
}

/// True when `streak` is a power of two >= 2 (2, 4, 8, 16, ...)
fn is_escalation_point(streak: u32) -> bool {
    streak >= 2 && streak.is_power_of_two()
}

fn block_message() -> String {
    "Delegation check: you are about to make a solo tool call. \
     This is a one-time hard stop — delegate to a Task subagent instead. \
     After this, reminders will be advisory-only (non-blocking). \
     Use the Task tool to spawn a subagent, then synthesize what it returns."
        .to_string()
}

/// Escalating advisory wording keyed to the streak value
fn advisory_message(streak: u32) -> String {
    if streak <= 2 {
        format!(
            "Delegation reminder [streak={streak}]: you have made {streak} consecutive \
             solo tool calls. Consider delegating this work to a Task subagent."
        )
    } else if streak <= 4 {
        format!(
            "Delegation advisory [streak={streak}]: {streak} consecutive solo tool calls. \
             Main session context is non-renewable — push reads, research, and \
             implementation to subagents. Use the Task tool."
        )
    } else if streak <= 8 {
        format!(
            "Delegation warning [streak={streak}]: {streak} consecutive solo tool calls. \
             Main session capacity is depleting. This work belongs in a subagent. \
             Spawn a Task now and synthesize the result."
        )
    } else {
        format!(
            "DELEGATION CRITICAL [streak={streak}]: {streak} consecutive solo tool calls. \
             You are consuming irreplaceable main session context. Stop and delegate \
             immediately. Use the Task tool to spawn a subagent for any further work."
        )
    }
}
