//! Moving the handle transfers the worker association

use std::thread;
use std::time::Duration;
use timed_task::{TaskState, TimedTask};
use timed_task_integration_tests::{count, counting_task, wait_until};

fn take_ownership(task: TimedTask) -> TimedTask {
    task
}

#[test]
fn test_moved_handle_keeps_running_worker() {
    let (mut task, counter) = counting_task(Duration::from_millis(10));
    task.start().unwrap();

    let mut moved = take_ownership(task);
    assert!(moved.is_running());
    assert_eq!(moved.state(), TaskState::Running);
    assert!(wait_until(Duration::from_secs(1), || count(&counter) >= 3));

    moved.stop();
    assert!(!moved.is_running());

    let after_stop = count(&counter);
    thread::sleep(Duration::from_millis(50));
    assert_eq!(count(&counter), after_stop);
}

#[test]
fn test_handle_moved_into_collection() {
    let (mut task, counter) = counting_task(Duration::from_millis(10));
    task.start().unwrap();

    let mut tasks = vec![task];
    assert!(tasks[0].is_running());

    tasks[0].stop();
    assert_eq!(tasks[0].state(), TaskState::Stopped);
    let after_stop = count(&counter);

    tasks.clear();
    thread::sleep(Duration::from_millis(30));
    assert_eq!(count(&counter), after_stop);
}

#[test]
fn test_handle_moved_to_another_thread() {
    let (mut task, counter) = counting_task(Duration::from_millis(10));
    task.start().unwrap();

    let owner = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        let was_running = task.is_running();
        task.stop();
        (was_running, task.state())
    });

    let (was_running, state) = owner.join().unwrap();
    assert!(was_running);
    assert_eq!(state, TaskState::Stopped);

    let after_stop = count(&counter);
    thread::sleep(Duration::from_millis(50));
    assert_eq!(count(&counter), after_stop);
}

#[test]
fn test_replacing_handle_stops_previous_task() {
    let (mut first, first_counter) = counting_task(Duration::from_millis(5));
    let (second, _second_counter) = counting_task(Duration::from_millis(5));
    first.start().unwrap();
    assert!(wait_until(Duration::from_secs(1), || count(&first_counter) >= 2));

    // Assignment drops the old value, which stops its worker
    first = second;
    assert!(!first.is_running());

    let after_replace = count(&first_counter);
    thread::sleep(Duration::from_millis(50));
    assert_eq!(count(&first_counter), after_replace);
}
