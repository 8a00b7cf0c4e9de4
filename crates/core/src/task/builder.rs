// Builder for TimedTask

use super::constants::{DEFAULT_INTERVAL, DEFAULT_TASK_NAME};
use super::{Action, PanicPolicy, TimedTask};
use crate::config::validate_name;
use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;

/// Builder for a [`TimedTask`]
///
/// All settings are optional. A task built without an action is valid but
/// `start()` does nothing for it.
///
/// # Example
/// ```text
/// let task = TimedTask::builder()
///     .name("heartbeat")
///     .interval(Duration::from_secs(30))
///     .panic_policy(PanicPolicy::Continue)
///     .action(|| println!("beat"))
///     .build()?;
/// ```
pub struct TimedTaskBuilder {
    name: String,
    action: Option<Action>,
    interval: Duration,
    panic_policy: PanicPolicy,
}

impl TimedTaskBuilder {
    pub fn new() -> Self {
        Self {
            name: DEFAULT_TASK_NAME.to_string(),
            action: None,
            interval: DEFAULT_INTERVAL,
            panic_policy: PanicPolicy::default(),
        }
    }

    /// Worker thread name, also used as the `task` field in logs
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn panic_policy(mut self, panic_policy: PanicPolicy) -> Self {
        self.panic_policy = panic_policy;
        self
    }

    /// # Errors
    /// `TaskError::InvalidConfig` if the name is empty, too long, or contains NUL.
    pub fn build(self) -> Result<TimedTask> {
        validate_name(&self.name)?;
        Ok(TimedTask::from_parts(
            self.name,
            self.action,
            self.interval,
            self.panic_policy,
        ))
    }
}

impl Default for TimedTaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskState;

    #[test]
    fn test_defaults() {
        let task = TimedTaskBuilder::new().build().unwrap();

        assert_eq!(task.name(), DEFAULT_TASK_NAME);
        assert_eq!(task.interval(), DEFAULT_INTERVAL);
        assert_eq!(task.panic_policy(), PanicPolicy::Stop);
        assert_eq!(task.state(), TaskState::Idle);
    }

    #[test]
    fn test_overrides() {
        let task = TimedTaskBuilder::new()
            .name("metrics-flush")
            .interval(Duration::from_millis(42))
            .panic_policy(PanicPolicy::Continue)
            .action(|| {})
            .build()
            .unwrap();

        assert_eq!(task.name(), "metrics-flush");
        assert_eq!(task.interval(), Duration::from_millis(42));
        assert_eq!(task.panic_policy(), PanicPolicy::Continue);
    }

    #[test]
    fn test_rejects_nul_in_name() {
        let result = TimedTaskBuilder::new().name("bad\0name").build();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("NUL"));
    }

    #[test]
    fn test_rejects_empty_name() {
        assert!(TimedTaskBuilder::new().name("").build().is_err());
    }
}
