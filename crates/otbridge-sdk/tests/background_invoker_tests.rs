//! 后台调用集成测试
//!
//! 验证：
//! 1. 单次调用恰好执行一次，且不在调用线程上执行
//! 2. 调用组按顺序在同一线程上执行，共享参数传给每一项
//! 3. 调用组中某项失败后，后续项不执行
//! 4. 启动立即返回，不等待调用完成
//! 5. 急停可在后台运动期间生效

use crossbeam_channel::bounded;
use otbridge_sdk::labware::mock::{CallLog, MockPipette, MockRobot, MockTipRack};
use otbridge_sdk::prelude::*;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_run_in_background_runs_once_off_caller_thread() {
    let log = CallLog::new();
    let robot = shared(MockRobot::new(log.clone()));
    let invoker = Invoker::default();

    run_in_background(&invoker, robot).unwrap().join().unwrap();

    let records = log.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].call, "robot.run");
    assert_ne!(records[0].thread, thread::current().id());
}

#[test]
fn test_run_in_background_returns_before_motion_completes() {
    let log = CallLog::new();
    let robot = shared(MockRobot::new(log.clone()).with_run_duration(Duration::from_millis(300)));
    let invoker = Invoker::default();

    let start = Instant::now();
    let mut handle = run_in_background(&invoker, robot).unwrap();
    let launch_time = start.elapsed();

    assert!(
        launch_time < Duration::from_millis(300),
        "spawn blocked for {:?}",
        launch_time
    );
    assert!(!handle.wait_timeout(Duration::ZERO));

    handle.join().unwrap();
    assert!(start.elapsed() >= Duration::from_millis(300));
}

#[test]
fn test_group_runs_in_order_on_one_thread_with_shared_args() {
    let invoker = Invoker::default();
    let seen: Arc<Mutex<Vec<(String, u32, thread::ThreadId)>>> = Arc::new(Mutex::new(Vec::new()));

    let items: Vec<WorkItem<u32>> = ["aspirate", "dispense", "blow_out"]
        .into_iter()
        .map(|name| {
            let seen = seen.clone();
            WorkItem::new(name, move |volume: &u32| {
                seen.lock()
                    .push((name.to_string(), *volume, thread::current().id()));
                Ok::<_, HardwareError>(())
            })
        })
        .collect();

    let report = run_group(&invoker, items, 150).unwrap().join().unwrap();
    assert_eq!(report.completed, 3);

    let seen = seen.lock();
    let names: Vec<&str> = seen.iter().map(|(n, _, _)| n.as_str()).collect();
    assert_eq!(names, vec!["aspirate", "dispense", "blow_out"]);
    assert!(seen.iter().all(|(_, v, _)| *v == 150));

    let threads: HashSet<_> = seen.iter().map(|(_, _, t)| *t).collect();
    assert_eq!(threads.len(), 1);
    assert!(!threads.contains(&thread::current().id()));
}

#[test]
fn test_group_failure_skips_remaining_items() {
    let log = CallLog::new();
    let robot = shared(MockRobot::new(log.clone()));
    let pipette = shared(MockPipette::new(log.clone()));
    let rack = MockTipRack::standard_96("tips");
    let invoker = Invoker::default();

    let empty_row = Row::new(0, Vec::new());
    let items = vec![
        WorkItem::locked("robot.home", robot.clone(), |r: &mut MockRobot, _: &()| r.home()),
        WorkItem::locked("pipette.start_at_tip", pipette.clone(), move |p: &mut MockPipette, _: &()| {
            p.start_at_tip(&empty_row)
        }),
        WorkItem::locked("robot.run", robot.clone(), |r: &mut MockRobot, _: &()| r.run()),
    ];

    let err = run_group(&invoker, items, ()).unwrap().join().unwrap_err();
    assert!(matches!(err, InvokeError::ItemFailed { index: 1, .. }));
    assert!(err.to_string().contains("No tips available"));
    assert_eq!(log.calls(), vec!["robot.home"]);

    // 失败没有影响之后的同步调用
    update_multichannel_start_row(&mut *pipette.lock(), &rack, 0).unwrap();
}

#[test]
fn test_run_method_passes_args() {
    let log = CallLog::new();
    let rack = Arc::new(MockTipRack::standard_96("tips"));
    let pipette = MockPipette::new(log.clone());
    let invoker = Invoker::default();

    let handle = run_method(
        &invoker,
        "pipette.start_at_tip",
        pipette,
        (rack.clone(), 6usize),
        |pipette, (rack, row)| {
            update_multichannel_start_row(pipette, rack.as_ref(), row)?;
            Ok::<_, HardwareError>(pipette.start_row().cloned())
        },
    )
    .unwrap();
    assert!(handle.name().starts_with("methDaemon-"));

    let row = handle.join().unwrap();
    assert_eq!(row, Some(rack.row(6).unwrap()));
}

#[test]
fn test_background_failure_is_reported_not_swallowed() {
    let log = CallLog::new();
    let robot = shared(
        MockRobot::new(log).failing_with(HardwareError::device("limit switch triggered")),
    );
    let invoker = Invoker::builder().log_failures(false).build();

    let err = run_in_background(&invoker, robot).unwrap().join().unwrap_err();
    assert!(err.is_call_failure());
    assert!(err.to_string().contains("limit switch triggered"));

    let snapshot = invoker.metrics().snapshot();
    assert_eq!(snapshot.tasks_failed, 1);
    assert_eq!(snapshot.tasks_in_flight(), 0);
}

#[test]
fn test_halt_interrupts_background_run() {
    let log = CallLog::new();
    let robot = shared(MockRobot::new(log.clone()).with_run_duration(Duration::from_secs(30)));
    let driver = robot.lock().driver();
    let invoker = Invoker::default();

    let handle = run_in_background(&invoker, robot.clone()).unwrap();
    thread::sleep(Duration::from_millis(20));
    halt_driver(driver.as_ref()).unwrap();

    let err = handle.join_timeout(Duration::from_secs(5)).unwrap_err();
    match err {
        InvokeError::Call(source) => assert_eq!(source.to_string(), "Robot halted"),
        other => panic!("Expected Call error, got {other:?}"),
    }
    let mut calls = log.calls();
    calls.sort();
    assert_eq!(calls, vec!["driver.halt", "robot.run"]);
}

#[test]
fn test_concurrent_groups_complete_independently() {
    let invoker = Invoker::default();
    let (gate_tx, gate_rx) = bounded::<()>(0);

    let blocked = run_group(
        &invoker,
        vec![WorkItem::on("wait", gate_rx, |rx, _: &()| {
            rx.recv().map_err(|_| HardwareError::device("gate closed"))
        })],
        (),
    )
    .unwrap();

    // 第二组不受第一组阻塞影响
    let free = run_group(
        &invoker,
        vec![WorkItem::new("noop", |_: &()| Ok::<_, HardwareError>(()))],
        (),
    )
    .unwrap();
    assert_eq!(free.join().unwrap().completed, 1);
    assert!(!blocked.is_finished());

    gate_tx.send(()).unwrap();
    assert_eq!(blocked.join().unwrap().completed, 1);
}
