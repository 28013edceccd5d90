//! delegation_guard - session-scoped delegation policy for Claude Code
//!
//! This crate implements the `delegation-guard` hook: a short-lived process
//! the host invokes once per tool-call lifecycle event. It watches how many
//! consecutive tool calls the main session executes without delegating to a
//! subagent, and per event either hard-blocks the call once, injects an
//! escalating advisory, or passes through silently.
//!
//! # Architecture
//!
//! One invocation is a load/compute/store cycle, deliberately kept as a
//! stateless-looking process per event rather than a daemon:
//!
//! ```text
//! host -> stdin JSON event -> load state file -> evaluate -> store state
//!      <- stdout JSON decision
//! ```
//!
//! Modules:
//! - `event`: stdin event parsing (`PreToolUse`, `SubagentStart`, `SubagentStop`)
//! - `tools`: the fixed delegating/exempt/ordinary tool classification
//! - `state`: the persisted per-session record and its keyed file store
//! - `engine`: the policy state machine (latch, streak, suppression, grace)
//! - `response`: the JSON decision the host reads from stdout
//! - `error`: error types
//!
//! # Example
//!
//! ```
//! use delegation_guard::prelude::*;
//!
//! let input = HookInput::parse_lenient(
//!     r#"{"hook_event_name": "PreToolUse", "session_id": "s1", "tool_name": "Bash"}"#,
//! )
//! .unwrap();
//!
//! let mut state = SessionDelegationState::default();
//! let decision = evaluate(&input, &mut state);
//! let json = HookResponse::from_decision(decision).to_json();
//!
//! assert!(json.contains("permissionDecision"));
//! ```
//!
//! # Failure policy
//!
//! A hook fault must never block the host's pipeline: malformed input is a
//! silent no-op, a corrupt state file is treated as absent, and a failed
//! state write is logged to stderr without changing the decision already
//! computed. Every code path terminates in one well-formed JSON object on
//! stdout.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// The policy state machine: one event in, one decision and next state out
pub mod engine;

/// Error types
pub mod error;

/// Hook input parsing for the three lifecycle events
pub mod event;

/// Decision wire format written to stdout
pub mod response;

/// Persisted per-session state and its keyed file store
pub mod state;

/// Delegating / exempt / ordinary tool classification
pub mod tools;

// Prelude module for common imports
pub mod prelude {
    //! Common imports for delegation_guard users

    pub use crate::engine::{evaluate, Decision};
    pub use crate::error::GuardError;
    pub use crate::event::{HookEventName, HookInput};
    pub use crate::response::{HookResponse, PermissionDecision};
    pub use crate::state::{SessionDelegationState, StateStore};
    pub use crate::tools::{classify, ToolClass};
}
