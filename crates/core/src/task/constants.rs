// Task constants (no magic values)
use std::time::Duration;

/// Default idle interval between invocations, in milliseconds (1s)
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// Default idle interval between invocations
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(DEFAULT_INTERVAL_MS);

/// Worker thread name used when none is configured
pub const DEFAULT_TASK_NAME: &str = "timed-task";

/// Maximum accepted task name length
pub const MAX_TASK_NAME_LEN: usize = 64;
