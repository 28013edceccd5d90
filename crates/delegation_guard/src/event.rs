//! Hook input parsing.
//!
//! The host invokes the hook binary once per lifecycle event and supplies a
//! single JSON object on stdin. Only three fields matter to this guard:
//! the event name, the session identifier, and (for `PreToolUse`) the tool
//! name. Everything else the host sends is ignored.

use serde::{Deserialize, Serialize};

/// Lifecycle event that triggers one guard invocation
///
/// Wire names match the host's `hook_event_name` values exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookEventName {
    /// A tool call is about to execute
    PreToolUse,
    /// A subordinate execution context (subagent) has started
    SubagentStart,
    /// A subordinate execution context (subagent) has stopped
    SubagentStop,
}

/// Input data passed to the guard for one event
///
/// # Examples
///
/// ```
/// use delegation_guard::event::{HookEventName, HookInput};
///
/// let input = HookInput::parse_lenient(
///     r#"{"hook_event_name": "PreToolUse", "session_id": "abc", "tool_name": "Bash"}"#,
/// )
/// .unwrap();
///
/// assert_eq!(input.hook_event_name, HookEventName::PreToolUse);
/// assert_eq!(input.tool_name.as_deref(), Some("Bash"));
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct HookInput {
    /// Which lifecycle event fired
    pub hook_event_name: HookEventName,

    /// Opaque identifier, stable for the lifetime of one conversation
    ///
    /// Subagents share their parent's session id by design.
    #[serde(default)]
    pub session_id: String,

    /// Name of the tool about to run (present for `PreToolUse` events)
    #[serde(default)]
    pub tool_name: Option<String>,
}

impl HookInput {
    /// Parse a raw stdin payload, tolerating anything malformed.
    ///
    /// Returns `None` for unparseable JSON, a missing or unrecognized event
    /// name, or a non-object payload. The caller treats `None` as a no-op
    /// event and emits `{}` — a bad payload must never crash the hook.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        match serde_json::from_str::<Self>(raw) {
            Ok(input) => Some(input),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring unparseable hook input");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pre_tool_use() {
        let input = HookInput::parse_lenient(
            r#"{"hook_event_name": "PreToolUse", "session_id": "s1", "tool_name": "Read"}"#,
        )
        .unwrap();
        assert_eq!(input.hook_event_name, HookEventName::PreToolUse);
        assert_eq!(input.session_id, "s1");
        assert_eq!(input.tool_name.as_deref(), Some("Read"));
    }

    #[test]
    fn test_parse_subagent_events_without_tool_name() {
        let start = HookInput::parse_lenient(
            r#"{"hook_event_name": "SubagentStart", "session_id": "s1"}"#,
        )
        .unwrap();
        assert_eq!(start.hook_event_name, HookEventName::SubagentStart);
        assert!(start.tool_name.is_none());

        let stop = HookInput::parse_lenient(
            r#"{"hook_event_name": "SubagentStop", "session_id": "s1"}"#,
        )
        .unwrap();
        assert_eq!(stop.hook_event_name, HookEventName::SubagentStop);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let input = HookInput::parse_lenient(
            r#"{"hook_event_name": "PreToolUse", "session_id": "s1", "tool_name": "Bash",
                "transcript_path": "/tmp/t.jsonl", "cwd": "/work"}"#,
        )
        .unwrap();
        assert_eq!(input.tool_name.as_deref(), Some("Bash"));
    }

    #[test]
    fn test_missing_session_id_defaults_to_empty() {
        let input =
            HookInput::parse_lenient(r#"{"hook_event_name": "PreToolUse"}"#).unwrap();
        assert_eq!(input.session_id, "");
        assert!(input.tool_name.is_none());
    }

    #[test]
    fn test_malformed_json_is_none() {
        assert!(HookInput::parse_lenient("not valid json at all").is_none());
        assert!(HookInput::parse_lenient("").is_none());
        assert!(HookInput::parse_lenient("[1, 2, 3]").is_none());
    }

    #[test]
    fn test_unknown_event_name_is_none() {
        assert!(HookInput::parse_lenient(
            r#"{"hook_event_name": "PostToolUse", "session_id": "s1"}"#
        )
        .is_none());
        assert!(HookInput::parse_lenient(r#"{"session_id": "s1"}"#).is_none());
    }
}
