// Timed Task - periodic action on a dedicated, cancellable worker thread
// NO async runtime: one std thread per running task

pub mod config;
pub mod error;
pub mod task;

pub use config::TaskConfig;
pub use error::{Result, TaskError};
pub use task::{PanicPolicy, TaskState, TimedTask, TimedTaskBuilder};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
