//! Timed Task - Demonstration Entry Point
//! Three call sites: free function, method, closure

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use timed_task::TimedTask;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_RUN_MS: u64 = 1000;

fn fun(param1: i32, param2: i64) {
    println!("Fun called with params: {}, {}", param1, param2);
}

struct Reporter;

impl Reporter {
    fn mem(&self, param1: i32, param2: i64) {
        println!("mem called with params: {}, {}", param1, param2);
    }
}

fn init_logging() -> Result<()> {
    let log_format =
        std::env::var("TIMED_TASK_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("timed_task=info,timed_task_demo=info"))
        .context("Failed to create env filter")?;

    match log_format.as_str() {
        "json" => {
            // Machine-readable structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Start a task, let it tick for `duration`, then drop it (which stops it)
fn run_for(mut task: TimedTask, duration: Duration) -> Result<()> {
    let name = task.name().to_string();
    task.start()
        .with_context(|| format!("Failed to start task '{}'", name))?;
    std::thread::sleep(duration);

    info!(
        task = %name,
        invocations = task.invocations(),
        "Demo finished"
    );
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;
    info!("Timed Task demo v{} starting...", VERSION);

    let run_ms: u64 = std::env::var("TIMED_TASK_RUN_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RUN_MS);
    let run_duration = Duration::from_millis(run_ms);

    // Example 1: free function every 100 ms
    let task = TimedTask::builder()
        .name("free-function")
        .interval(Duration::from_millis(100))
        .action(|| fun(3, 4))
        .build()?;
    run_for(task, run_duration)?;

    // Example 2: method on a shared receiver every 200 ms
    let reporter = Arc::new(Reporter);
    let task = TimedTask::builder()
        .name("method")
        .interval(Duration::from_millis(200))
        .action(move || reporter.mem(1, 2))
        .build()?;
    run_for(task, run_duration)?;

    // Example 3: closure every 500 ms
    let test = |t: i32| println!("closure called with params {}", t);
    let task = TimedTask::builder()
        .name("closure")
        .interval(Duration::from_millis(500))
        .action(move || test(23))
        .build()?;
    run_for(task, run_duration)?;

    info!("Timed Task demo finished");
    Ok(())
}
