//! Lifecycle transitions: start/stop idempotence, restart, faults, configuration

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use timed_task::{PanicPolicy, TaskConfig, TaskState, TimedTask};
use timed_task_integration_tests::{count, counting_task, wait_until};

#[test]
fn test_full_lifecycle() {
    let (mut task, counter) = counting_task(Duration::from_millis(20));
    assert_eq!(task.state(), TaskState::Idle);

    task.start().unwrap();
    assert_eq!(task.state(), TaskState::Running);
    assert!(wait_until(Duration::from_secs(1), || count(&counter) >= 2));

    task.stop();
    assert_eq!(task.state(), TaskState::Stopped);
    assert!(!task.is_running());
}

#[test]
fn test_double_start_spawns_one_worker() {
    let (mut task, counter) = counting_task(Duration::from_secs(10));

    task.start().unwrap();
    task.start().unwrap();
    thread::sleep(Duration::from_millis(100));

    // Each worker invokes immediately, so two workers would mean two calls
    assert_eq!(count(&counter), 1);
    task.stop();
    assert_eq!(count(&counter), 1);
}

#[test]
fn test_stop_on_stopped_task_is_noop() {
    let (mut task, counter) = counting_task(Duration::from_millis(10));

    task.stop();
    assert_eq!(task.state(), TaskState::Idle);
    assert_eq!(count(&counter), 0);

    task.start().unwrap();
    task.stop();
    let calls = count(&counter);

    task.stop();
    assert_eq!(task.state(), TaskState::Stopped);
    assert_eq!(count(&counter), calls);
}

#[test]
fn test_repeated_start_stop_cycles() {
    let (mut task, counter) = counting_task(Duration::from_secs(10));

    for run in 1..=5 {
        task.start().unwrap();
        assert!(task.is_running());
        task.stop();
        assert!(!task.is_running());
        assert_eq!(count(&counter), run);
    }
    assert_eq!(task.invocations(), 5);
}

#[test]
fn test_task_without_action_never_runs() {
    let mut task = TimedTask::builder()
        .name("empty")
        .interval(Duration::from_millis(5))
        .build()
        .unwrap();

    task.start().unwrap();
    thread::sleep(Duration::from_millis(30));

    assert!(!task.is_running());
    assert_eq!(task.invocations(), 0);
    task.stop();
}

#[test]
fn test_drop_stops_running_task() {
    let (mut task, counter) = counting_task(Duration::from_millis(5));
    task.start().unwrap();
    assert!(wait_until(Duration::from_secs(1), || count(&counter) >= 2));

    drop(task);

    let after_drop = count(&counter);
    thread::sleep(Duration::from_millis(100));
    assert_eq!(count(&counter), after_drop);
}

#[test]
fn test_action_panic_stops_worker() {
    let mut task = TimedTask::builder()
        .name("panicky")
        .interval(Duration::from_millis(5))
        .action(|| panic!("disk unavailable"))
        .build()
        .unwrap();

    task.start().unwrap();
    assert!(wait_until(Duration::from_secs(1), || !task.is_running()));

    assert_eq!(task.state(), TaskState::Faulted);
    assert_eq!(task.last_fault().as_deref(), Some("disk unavailable"));
    assert_eq!(task.invocations(), 1);
}

#[test]
fn test_action_panic_with_continue_policy() {
    let calls = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&calls);
    let mut task = TimedTask::builder()
        .interval(Duration::from_millis(5))
        .panic_policy(PanicPolicy::Continue)
        .action(move || {
            if c.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
                panic!("flaky");
            }
        })
        .build()
        .unwrap();

    task.start().unwrap();
    assert!(wait_until(Duration::from_secs(1), || count(&calls) >= 4));
    assert!(task.is_running());
    assert!(task.panics() >= 2);

    task.stop();
    assert_eq!(task.state(), TaskState::Stopped);
}

#[test]
fn test_task_from_json_config() {
    let config = TaskConfig::from_json(
        r#"{"name": "from-config", "interval_ms": 15, "panic_policy": "CONTINUE"}"#,
    )
    .unwrap();

    let counter = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&counter);
    let mut task = TimedTask::from_config(&config, move || {
        c.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    assert_eq!(task.name(), "from-config");
    assert_eq!(task.interval(), Duration::from_millis(15));

    task.start().unwrap();
    assert!(wait_until(Duration::from_secs(1), || count(&counter) >= 2));
    task.stop();
}
