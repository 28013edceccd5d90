//! Tool classification.
//!
//! The guard splits the tool namespace into a fixed, closed set of three
//! classes. Classification is by exact name: the guard never inspects tool
//! input or command content.

/// How a tool interacts with delegation pressure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolClass {
    /// Spawns a subordinate execution context; always resets pressure
    Delegating,
    /// Explicitly excluded from pressure accounting
    Exempt,
    /// Everything else; accumulates pressure
    Ordinary,
}

/// Tools that neither increment nor reset the streak.
///
/// Interactive skill invocation, user clarification, plan-mode transitions,
/// and task-list bookkeeping are orchestration overhead, not solo work.
const EXEMPT_TOOLS: &[&str] = &[
    "Skill",
    "AskUserQuestion",
    "TaskCreate",
    "TaskUpdate",
    "TaskGet",
    "TaskList",
    "EnterPlanMode",
    "ExitPlanMode",
];

/// Classify a tool by name.
///
/// "Agent" is the spawn tool's name as of Claude Code v2.1.63; "Task" is the
/// legacy name. Both are recognized so the guard works across CLI versions.
///
/// # Examples
///
/// ```
/// use delegation_guard::tools::{classify, ToolClass};
///
/// assert_eq!(classify("Task"), ToolClass::Delegating);
/// assert_eq!(classify("Skill"), ToolClass::Exempt);
/// assert_eq!(classify("Bash"), ToolClass::Ordinary);
/// ```
pub fn classify(tool_name: &str) -> ToolClass {
    match tool_name {
        "Task" | "Agent" => ToolClass::Delegating,
        name if EXEMPT_TOOLS.contains(&name) => ToolClass::Exempt,
        _ => ToolClass::Ordinary,
    }
}
