// Task Configuration

use crate::error::{Result, TaskError};
use crate::task::constants::{DEFAULT_INTERVAL_MS, DEFAULT_TASK_NAME, MAX_TASK_NAME_LEN};
use crate::task::PanicPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Serializable task settings
///
/// Missing fields fall back to defaults, so `{}` is a valid configuration.
///
/// # Example
/// ```text
/// {"name": "heartbeat", "interval_ms": 500, "panic_policy": "CONTINUE"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    pub name: String,
    pub interval_ms: u64,
    pub panic_policy: PanicPolicy,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_TASK_NAME.to_string(),
            interval_ms: DEFAULT_INTERVAL_MS,
            panic_policy: PanicPolicy::default(),
        }
    }
}

impl TaskConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// Rules:
    /// - name: 1-64 chars, no NUL (it becomes the thread name)
    /// - interval_ms: > 0
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;

        if self.interval_ms == 0 {
            return Err(TaskError::InvalidConfig(
                "interval_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(TaskError::InvalidConfig(
            "Task name cannot be empty".to_string(),
        ));
    }

    if name.len() > MAX_TASK_NAME_LEN {
        return Err(TaskError::InvalidConfig(format!(
            "Task name too long (max {} chars)",
            MAX_TASK_NAME_LEN
        )));
    }

    if name.contains('\0') {
        return Err(TaskError::InvalidConfig(
            "Task name cannot contain NUL bytes".to_string(),
        ));
    }

    Ok(())
}
