//! The `delegation-guard` hook binary.
//!
//! Invoked by the host once per lifecycle event: reads one JSON event from
//! stdin, runs the policy engine against the session's persisted state, and
//! prints exactly one JSON decision to stdout. Diagnostics go to stderr;
//! stdout is reserved for the decision object.
//!
//! Exit code is 0 for everything benign, including all recovered errors.

use std::io::Read;

use delegation_guard::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    // Logging to stderr only; the host parses stdout as JSON.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    println!("{}", run());
}

/// Drive one load/evaluate/store cycle and return the JSON to print.
///
/// Infallible by design: every error collapses into the silent `{}` path.
fn run() -> String {
    let mut raw = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut raw) {
        tracing::warn!(error = %err, "could not read hook input");
        return HookResponse::silent().to_json();
    }

    let Some(input) = HookInput::parse_lenient(&raw) else {
        return HookResponse::silent().to_json();
    };

    let store = StateStore::from_env();
    let mut state = store.load(&input.session_id);
    let decision = evaluate(&input, &mut state);

    // A failed write loses this event's effect but must not change the
    // decision already computed for it.
    if let Err(err) = store.store(&input.session_id, &state) {
        tracing::warn!(
            session_id = %input.session_id,
            error = %err,
            "could not persist delegation state"
        );
    }

    HookResponse::from_decision(decision).to_json()
}
