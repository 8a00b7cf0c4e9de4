// Panic isolation for the worker thread
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{catch_unwind, UnwindSafe};

/// What the worker does after the action panics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PanicPolicy {
    /// Terminate the worker; the task reports `Faulted` and is no longer running
    #[default]
    Stop,
    /// Record the fault and keep the schedule going
    Continue,
}

impl std::fmt::Display for PanicPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanicPolicy::Stop => write!(f, "STOP"),
            PanicPolicy::Continue => write!(f, "CONTINUE"),
        }
    }
}

/// Result of a panic-guarded execution
#[derive(Debug)]
pub(crate) enum PanicGuardResult<T> {
    /// Execution completed successfully
    Success(T),
    /// Execution panicked
    Panicked(String),
}

/// Execute a closure with panic isolation
///
/// If the closure panics, the panic is caught and returned as `PanicGuardResult::Panicked`
/// so a faulty action cannot unwind through the worker loop.
pub(crate) fn execute_guarded<F, T>(f: F) -> PanicGuardResult<T>
where
    F: FnOnce() -> T + UnwindSafe,
{
    match catch_unwind(f) {
        Ok(result) => PanicGuardResult::Success(result),
        Err(payload) => PanicGuardResult::Panicked(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
