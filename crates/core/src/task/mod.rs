// Timed Task - periodic action on a dedicated worker thread

pub mod builder;
pub mod constants;
mod panic_guard;
mod signal;
mod stats;
mod worker;

pub use builder::TimedTaskBuilder;
pub use panic_guard::PanicPolicy;

use crate::config::TaskConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use signal::StopSignal;
use stats::TaskStats;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info};
use worker::{Worker, WorkerExit};

/// Shared, read-only action invoked once per cycle
pub(crate) type Action = Arc<dyn Fn() + Send + Sync + 'static>;

/// Task lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    /// Constructed, never started
    Idle,
    Running,
    /// Stopped by the owner; may be started again
    Stopped,
    /// Worker ended because the action panicked; may be started again
    Faulted,
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskState::Idle => write!(f, "IDLE"),
            TaskState::Running => write!(f, "RUNNING"),
            TaskState::Stopped => write!(f, "STOPPED"),
            TaskState::Faulted => write!(f, "FAULTED"),
        }
    }
}

/// Executes periodic calls of an action on a dedicated thread
///
/// The action runs immediately on `start()`, then again each time the interval
/// elapses after the previous call returned. `stop()` interrupts the idle wait
/// and joins the thread. Dropping the handle stops the task.
///
/// The handle can be moved but not cloned; the worker thread stays associated
/// with whichever binding owns it.
///
/// # Example
/// ```text
/// let mut task = TimedTask::new(|| println!("tick"), Duration::from_millis(100));
/// task.start()?;
/// std::thread::sleep(Duration::from_secs(1));
/// task.stop();
/// ```
pub struct TimedTask {
    name: String,
    action: Option<Action>,
    panic_policy: PanicPolicy,
    signal: StopSignal,
    stats: Arc<TaskStats>,
    worker: Option<JoinHandle<WorkerExit>>,
    state: TaskState,
}

impl TimedTask {
    /// Create a task with the default name and panic policy; does not start it
    pub fn new<F>(action: F, interval: Duration) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::from_parts(
            constants::DEFAULT_TASK_NAME.to_string(),
            Some(Arc::new(action)),
            interval,
            PanicPolicy::default(),
        )
    }

    pub fn builder() -> TimedTaskBuilder {
        TimedTaskBuilder::new()
    }

    /// Create a task from a validated configuration
    pub fn from_config<F>(config: &TaskConfig, action: F) -> Result<Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        config.validate()?;
        Ok(Self::from_parts(
            config.name.clone(),
            Some(Arc::new(action)),
            config.interval(),
            config.panic_policy,
        ))
    }

    pub(crate) fn from_parts(
        name: String,
        action: Option<Action>,
        interval: Duration,
        panic_policy: PanicPolicy,
    ) -> Self {
        Self {
            name,
            action,
            panic_policy,
            signal: StopSignal::new(interval),
            stats: Arc::new(TaskStats::default()),
            worker: None,
            state: TaskState::Idle,
        }
    }

    /// Spawn the worker thread
    ///
    /// No-op if a worker is already alive or the task has no action.
    /// Returns without waiting for the first invocation.
    ///
    /// # Errors
    /// `TaskError::Spawn` if the OS cannot create the thread.
    pub fn start(&mut self) -> Result<()> {
        let Some(action) = self.action.clone() else {
            debug!(task = %self.name, "No action configured, start ignored");
            return Ok(());
        };

        if let Some(handle) = &self.worker {
            if !handle.is_finished() {
                debug!(task = %self.name, "Task already running, start ignored");
                return Ok(());
            }
            // Worker ended on its own (action fault); reap it before respawning
            self.join_worker();
        }

        self.signal.reset();
        let worker = Worker {
            name: self.name.clone(),
            action,
            signal: self.signal.clone(),
            stats: Arc::clone(&self.stats),
            panic_policy: self.panic_policy,
        };

        let handle = thread::Builder::new()
            .name(self.name.clone())
            .spawn(move || worker.run())?;

        self.worker = Some(handle);
        self.state = TaskState::Running;
        info!(
            task = %self.name,
            interval_ms = %self.interval().as_millis(),
            "Timed task started"
        );
        Ok(())
    }

    /// Signal the worker to exit and block until it has
    ///
    /// Waits at most for an in-flight action to return, never a full interval.
    /// No-op if the task is not running.
    pub fn stop(&mut self) {
        if self.worker.is_none() {
            return;
        }

        self.signal.request_stop();
        self.join_worker();
        info!(task = %self.name, state = %self.state, "Timed task stopped");
    }

    fn join_worker(&mut self) {
        let Some(handle) = self.worker.take() else {
            return;
        };

        self.state = match handle.join() {
            Ok(WorkerExit::Stopped) => TaskState::Stopped,
            Ok(WorkerExit::Faulted) => TaskState::Faulted,
            Err(_) => {
                error!(task = %self.name, "Worker thread panicked outside the action guard");
                TaskState::Faulted
            }
        };
    }

    /// Whether a worker thread exists and has not exited
    ///
    /// Coarse liveness only: does not tell whether the action is mid-call or idle.
    /// Reports false once a worker has terminated after an action panic.
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Current lifecycle state
    pub fn state(&self) -> TaskState {
        match &self.worker {
            // Only a fault ends the worker without a join from `stop()`
            Some(handle) if handle.is_finished() => TaskState::Faulted,
            _ => self.state,
        }
    }

    /// Replace the interval; takes effect on the next idle wait
    pub fn set_interval(&self, interval: Duration) {
        self.signal.set_interval(interval);
        debug!(task = %self.name, interval_ms = %interval.as_millis(), "Interval updated");
    }

    pub fn interval(&self) -> Duration {
        self.signal.interval()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn panic_policy(&self) -> PanicPolicy {
        self.panic_policy
    }

    /// Number of action invocations across all runs
    pub fn invocations(&self) -> u64 {
        self.stats.invocations()
    }

    /// Number of action panics caught across all runs
    pub fn panics(&self) -> u64 {
        self.stats.panics()
    }

    /// Message of the most recent action panic
    pub fn last_fault(&self) -> Option<String> {
        self.stats.last_fault()
    }
}

impl Drop for TimedTask {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for TimedTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedTask")
            .field("name", &self.name)
            .field("has_action", &self.action.is_some())
            .field("interval", &self.interval())
            .field("panic_policy", &self.panic_policy)
            .field("state", &self.state())
            .field("stop_requested", &self.signal.is_stop_requested())
            .finish()
    }
}
