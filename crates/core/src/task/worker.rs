// Worker - run loop executed on the task's dedicated thread

use super::panic_guard::{execute_guarded, PanicGuardResult, PanicPolicy};
use super::signal::{StopSignal, WaitOutcome};
use super::stats::TaskStats;
use super::Action;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info};

/// How the run loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WorkerExit {
    /// Stop was requested by the owner
    Stopped,
    /// The action panicked under `PanicPolicy::Stop`
    Faulted,
}

pub(crate) struct Worker {
    pub(crate) name: String,
    pub(crate) action: Action,
    pub(crate) signal: StopSignal,
    pub(crate) stats: Arc<TaskStats>,
    pub(crate) panic_policy: PanicPolicy,
}

impl Worker {
    /// Invoke, then wait; repeat until stopped
    ///
    /// The first invocation happens immediately. Only the wait is cancellable;
    /// an action in progress always runs to completion.
    pub(crate) fn run(self) -> WorkerExit {
        debug!(task = %self.name, "Worker started");

        loop {
            self.stats.record_invocation();
            let action = &self.action;
            match execute_guarded(AssertUnwindSafe(|| action())) {
                PanicGuardResult::Success(()) => {}
                PanicGuardResult::Panicked(panic_msg) => {
                    error!(task = %self.name, panic_msg = %panic_msg, policy = %self.panic_policy, "Task action panicked");
                    self.stats.record_fault(panic_msg);

                    if self.panic_policy == PanicPolicy::Stop {
                        info!(task = %self.name, "Worker terminated after action panic");
                        return WorkerExit::Faulted;
                    }
                }
            }

            match self.signal.wait() {
                WaitOutcome::Stopped => break,
                WaitOutcome::Elapsed => {
                    debug!(task = %self.name, "Interval elapsed");
                }
            }
        }

        debug!(task = %self.name, "Worker stopped");
        WorkerExit::Stopped
    }
}
