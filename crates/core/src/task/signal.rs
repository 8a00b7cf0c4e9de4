// Stop Signal - cancellable idle wait shared by a task handle and its worker

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// State guarded by the signal lock
#[derive(Debug)]
struct Control {
    stop_requested: bool,
    interval: Duration,
}

#[derive(Debug)]
struct Inner {
    control: Mutex<Control>,
    wake: Condvar,
}

/// Result of one idle wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WaitOutcome {
    /// The full interval passed without a stop request
    Elapsed,
    /// A stop was requested before or during the wait
    Stopped,
}

/// Stop flag + interval pair behind a single lock, with a condvar for early wake-up
///
/// The owner side calls `request_stop` / `set_interval`; the worker side calls `wait`.
#[derive(Debug, Clone)]
pub(crate) struct StopSignal {
    inner: Arc<Inner>,
}

impl StopSignal {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                control: Mutex::new(Control {
                    stop_requested: false,
                    interval,
                }),
                wake: Condvar::new(),
            }),
        }
    }

    // The action never runs under this lock, so a poisoned lock still holds consistent data.
    fn lock(&self) -> MutexGuard<'_, Control> {
        self.inner
            .control
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Clear the stop flag before a new run
    pub(crate) fn reset(&self) {
        self.lock().stop_requested = false;
    }

    /// Set the stop flag and wake the worker if it is idle
    pub(crate) fn request_stop(&self) {
        {
            let mut control = self.lock();
            control.stop_requested = true;
        }
        self.inner.wake.notify_one();
    }

    pub(crate) fn is_stop_requested(&self) -> bool {
        self.lock().stop_requested
    }

    pub(crate) fn interval(&self) -> Duration {
        self.lock().interval
    }

    /// Replace the interval; picked up by the next `wait`
    pub(crate) fn set_interval(&self, interval: Duration) {
        self.lock().interval = interval;
    }

    /// Block for up to the current interval, returning early on a stop request
    pub(crate) fn wait(&self) -> WaitOutcome {
        let control = self.lock();
        if control.stop_requested {
            return WaitOutcome::Stopped;
        }

        let interval = control.interval;
        let (control, _timeout) = self
            .inner
            .wake
            .wait_timeout_while(control, interval, |c| !c.stop_requested)
            .unwrap_or_else(PoisonError::into_inner);

        if control.stop_requested {
            WaitOutcome::Stopped
        } else {
            WaitOutcome::Elapsed
        }
    }
}
