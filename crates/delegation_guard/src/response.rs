//! Decision wire format.
//!
//! The host reads exactly one JSON object from the hook's stdout:
//!
//! - silent pass-through: `{}`
//! - hard block: `hookSpecificOutput` with `permissionDecision: "deny"` and
//!   a reason string
//! - advisory: `hookSpecificOutput` with `additionalContext` and no denial
//!   field
//!
//! Field names are camelCase per the host contract.

use serde::Serialize;

use crate::engine::Decision;

/// Permission decision carried by a blocking response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionDecision {
    /// Allow the tool call to proceed
    Allow,
    /// Deny the tool call
    Deny,
    /// Ask the user for permission
    Ask,
}

/// The `hookSpecificOutput` payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    /// Event this output responds to (always `"PreToolUse"` for this guard)
    pub hook_event_name: &'static str,

    /// Permission decision, present only for blocks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_decision: Option<PermissionDecision>,

    /// Human-readable reason shown alongside a denial
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_decision_reason: Option<String>,

    /// Non-blocking context injected into the session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}

/// Top-level hook response
///
/// # Examples
///
/// ```
/// use delegation_guard::response::HookResponse;
///
/// assert_eq!(HookResponse::silent().to_json(), "{}");
///
/// let json = HookResponse::deny("blocked").to_json();
/// assert!(json.contains(r#""permissionDecision":"deny""#));
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookResponse {
    /// Decision payload; absent for silent pass-through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,
}

impl HookResponse {
    /// A silent pass-through, serializing to `{}`
    pub fn silent() -> Self {
        Self::default()
    }

    /// A hard block with a reason
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: "PreToolUse",
                permission_decision: Some(PermissionDecision::Deny),
                permission_decision_reason: Some(reason.into()),
                additional_context: None,
            }),
        }
    }

    /// A non-blocking advisory
    pub fn advise(context: impl Into<String>) -> Self {
        Self {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: "PreToolUse",
                permission_decision: None,
                permission_decision_reason: None,
                additional_context: Some(context.into()),
            }),
        }
    }

    /// Build the wire response for an engine decision
    pub fn from_decision(decision: Decision) -> Self {
        match decision {
            Decision::Silent => Self::silent(),
            Decision::Block(reason) => Self::deny(reason),
            Decision::Advise(context) => Self::advise(context),
        }
    }

    /// Serialize to the single JSON object the host expects.
    ///
    /// These types cannot fail to serialize, but the fallback keeps the
    /// "always print valid JSON" contract unconditional.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
