//! Persisted per-session delegation state.
//!
//! Each invocation of the guard is a separate short-lived process, so the
//! single mutable record lives in a keyed file store: one JSON file per
//! session identifier, rewritten in full on every relevant event. Records
//! are created lazily and never deleted — a host-issued new session id
//! simply orphans the old file, which is harmless.
//!
//! There is no file locking. Two concurrent invocations sharing a session id
//! (parent and subagent are separate OS processes by design) can lose an
//! update in a read-modify-write race. The policy is advisory in nature, so
//! an occasionally miscounted event is an accepted trade-off; see the
//! lost-update test below, which demonstrates the race rather than fixing it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GuardError;

/// Environment variable overriding the state directory
pub const STATE_DIR_ENV: &str = "CLAUDE_HOOK_STATE_DIR";

/// Delegation state for one session
///
/// Invariants maintained by the engine:
/// - `streak == 0` whenever `block_fired` is false (the counter only
///   advances after the one-time hard stop has fired)
/// - `subagent_count` never underflows (decrements saturate at zero)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDelegationState {
    /// Consecutive ordinary tool calls executed since the last reset
    #[serde(default)]
    pub streak: u32,

    /// Whether the one-time hard stop has fired for the current run
    #[serde(default)]
    pub block_fired: bool,

    /// Number of currently active subagents spawned by this session
    ///
    /// If a subagent dies without its stop event, this stays elevated for
    /// the rest of the session and the guard stays silent. Accepted: there
    /// is no timeout-based recovery.
    #[serde(default)]
    pub subagent_count: u32,

    /// True between a delegating call and the matching subagent-start event
    #[serde(default)]
    pub subagent_grace: bool,
}

/// Keyed file store mapping session id to [`SessionDelegationState`]
///
/// # Examples
///
/// ```
/// use delegation_guard::state::StateStore;
///
/// let store = StateStore::new("/tmp/hook-state");
/// let state = store.load("session-123"); // default state: no file yet
/// assert_eq!(state.streak, 0);
/// ```
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// Create a store rooted at an explicit directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a store from the environment.
    ///
    /// Uses `CLAUDE_HOOK_STATE_DIR` when set, else `$HOME/.claude/hook-state`.
    /// With `HOME` also unset, falls back to a relative `.claude/hook-state`
    /// so the hook still runs instead of failing.
    pub fn from_env() -> Self {
        let dir = match std::env::var(STATE_DIR_ENV) {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => {
                let home = std::env::var("HOME").unwrap_or_default();
                Path::new(&home).join(".claude").join("hook-state")
            }
        };
        Self { dir }
    }

    /// Path of the state file for one session
    pub fn state_path(&self, session_id: &str) -> PathBuf {
        self.dir.join(format!("{session_id}-delegation.json"))
    }

    /// Load the state for a session.
    ///
    /// A missing, unreadable, or schema-invalid file yields the default
    /// state. Corruption is logged and never surfaced to the caller.
    pub fn load(&self, session_id: &str) -> SessionDelegationState {
        let path = self.state_path(session_id);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return SessionDelegationState::default();
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "could not read state file");
                return SessionDelegationState::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "corrupt state file, starting from default state"
                );
                SessionDelegationState::default()
            }
        }
    }

    /// Persist the state for a session.
    ///
    /// An idempotent full overwrite: a crash between load and store loses at
    /// most that single event's effect, never corrupts the record.
    pub fn store(
        &self,
        session_id: &str,
        state: &SessionDelegationState,
    ) -> Result<(), GuardError> {
        std::fs::create_dir_all(&self.dir)?;
        let raw = serde_json::to_string(state)?;
        std::fs::write(self.state_path(session_id), raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, StateStore) {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_missing_file_yields_default() {
        let (_dir, store) = store();
        assert_eq!(store.load("nope"), SessionDelegationState::default());
    }

    #[test]
    fn test_roundtrip() {
        let (_dir, store) = store();
        let state = SessionDelegationState {
            streak: 7,
            block_fired: true,
            subagent_count: 2,
            subagent_grace: true,
        };
        store.store("s1", &state).unwrap();
        assert_eq!(store.load("s1"), state);
    }

    #[test]
    fn test_store_is_full_overwrite() {
        let (_dir, store) = store();
        let first = SessionDelegationState { streak: 9, block_fired: true, ..Default::default() };
        store.store("s1", &first).unwrap();
        let second = SessionDelegationState::default();
        store.store("s1", &second).unwrap();
        assert_eq!(store.load("s1"), second);
    }

    #[test]
    fn test_corrupt_file_yields_default() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("s1-delegation.json"), "this is not json {{{{").unwrap();
        assert_eq!(store.load("s1"), SessionDelegationState::default());
    }

    #[test]
    fn test_wrong_schema_yields_default() {
        let (dir, store) = store();
        std::fs::write(
            dir.path().join("s1-delegation.json"),
            r#"{"streak": "three", "block_fired": 1}"#,
        )
        .unwrap();
        assert_eq!(store.load("s1"), SessionDelegationState::default());
    }

    #[test]
    fn test_partial_record_loads_with_defaults() {
        // Files written by older builds lack the subagent fields
        let (dir, store) = store();
        std::fs::write(
            dir.path().join("s1-delegation.json"),
            r#"{"streak": 3, "block_fired": true}"#,
        )
        .unwrap();
        let state = store.load("s1");
        assert_eq!(state.streak, 3);
        assert!(state.block_fired);
        assert_eq!(state.subagent_count, 0);
        assert!(!state.subagent_grace);
    }

    #[test]
    fn test_sessions_do_not_contend() {
        let (_dir, store) = store();
        store
            .store("a", &SessionDelegationState { streak: 1, block_fired: true, ..Default::default() })
            .unwrap();
        store
            .store("b", &SessionDelegationState { streak: 5, block_fired: true, ..Default::default() })
            .unwrap();
        assert_eq!(store.load("a").streak, 1);
        assert_eq!(store.load("b").streak, 5);
    }

    /// Demonstrates (does not fix) the documented lost-update race.
    ///
    /// Two invocations that interleave as load/load/store/store both see
    /// `subagent_count == 0` and both write 1 — the second start event is
    /// lost. There is deliberately no locking or compare-and-swap.
    #[test]
    fn test_lost_update_between_concurrent_invocations() {
        let (_dir, store) = store();

        let mut first = store.load("s1");
        let mut second = store.load("s1");

        first.subagent_count += 1;
        store.store("s1", &first).unwrap();

        second.subagent_count += 1;
        store.store("s1", &second).unwrap();

        assert_eq!(store.load("s1").subagent_count, 1, "one of the two starts is lost");
    }
}
