//! 模拟硬件（无真实设备依赖）
//!
//! 所有模拟对象共享一个 [`CallLog`]，测试可以据此断言调用顺序和调用线程。

use crate::error::HardwareError;
use crate::hardware::{Calibration, ControlLibrary, Pipette, Robot, RobotDriver};
use crate::labware::{Labware, Row, Well};
use crate::vector::Vector;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};
use tracing::debug;

/// 单条调用记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    /// 调用描述（如 "robot.run"）
    pub call: String,
    /// 执行调用的线程
    pub thread: ThreadId,
}

/// 共享调用日志
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    records: Arc<Mutex<Vec<CallRecord>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次调用（使用当前线程）
    pub fn record(&self, call: impl Into<String>) {
        self.records.lock().push(CallRecord {
            call: call.into(),
            thread: thread::current().id(),
        });
    }

    /// 所有调用记录的快照
    pub fn records(&self) -> Vec<CallRecord> {
        self.records.lock().clone()
    }

    /// 仅调用描述（按发生顺序）
    pub fn calls(&self) -> Vec<String> {
        self.records.lock().iter().map(|r| r.call.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

/// 模拟驱动
#[derive(Debug)]
pub struct MockDriver {
    log: CallLog,
    halted: AtomicBool,
}

impl MockDriver {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            halted: AtomicBool::new(false),
        }
    }
}

impl RobotDriver for MockDriver {
    fn halt(&self) -> Result<(), HardwareError> {
        self.log.record("driver.halt");
        if self.halted.swap(true, Ordering::SeqCst) {
            debug!("mock driver already halted");
        }
        Ok(())
    }

    fn is_halted(&self) -> bool {
        self.halted.load(Ordering::SeqCst)
    }
}

/// 急停轮询间隔
const HALT_POLL: Duration = Duration::from_millis(1);

/// 模拟机器人
///
/// `run()` 在运动时长内轮询急停标志，急停后立即返回 [`HardwareError::Halted`]。
#[derive(Debug)]
pub struct MockRobot {
    log: CallLog,
    driver: Arc<MockDriver>,
    run_duration: Duration,
    fail_with: Option<HardwareError>,
}

impl MockRobot {
    pub fn new(log: CallLog) -> Self {
        Self {
            driver: Arc::new(MockDriver::new(log.clone())),
            log,
            run_duration: Duration::ZERO,
            fail_with: None,
        }
    }

    /// `run()` 的模拟运动时长
    pub fn with_run_duration(mut self, duration: Duration) -> Self {
        self.run_duration = duration;
        self
    }

    /// 让 `run()` 返回指定错误
    pub fn failing_with(mut self, error: HardwareError) -> Self {
        self.fail_with = Some(error);
        self
    }

    /// 具体类型的驱动（测试中直接断言急停状态）
    pub fn mock_driver(&self) -> Arc<MockDriver> {
        self.driver.clone()
    }
}

impl Robot for MockRobot {
    fn run(&mut self) -> Result<(), HardwareError> {
        self.log.record("robot.run");
        let started = Instant::now();
        let deadline = started + self.run_duration;
        loop {
            if self.driver.is_halted() {
                debug!(elapsed = ?started.elapsed(), "mock run interrupted by halt");
                return Err(HardwareError::Halted);
            }
            if Instant::now() >= deadline {
                break;
            }
            thread::sleep(HALT_POLL);
        }
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn driver(&self) -> Arc<dyn RobotDriver> {
        self.driver.clone()
    }

    fn home(&mut self) -> Result<(), HardwareError> {
        self.log.record("robot.home");
        if self.driver.is_halted() {
            return Err(HardwareError::Halted);
        }
        Ok(())
    }
}

/// 模拟移液器
#[derive(Debug)]
pub struct MockPipette {
    log: CallLog,
    start_row: Option<Row>,
}

impl MockPipette {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            start_row: None,
        }
    }

    /// 最近一次设置的起始排
    pub fn start_row(&self) -> Option<&Row> {
        self.start_row.as_ref()
    }
}

impl Pipette for MockPipette {
    fn start_at_tip(&mut self, row: &Row) -> Result<(), HardwareError> {
        if row.is_empty() {
            return Err(HardwareError::NoTipsAvailable);
        }
        self.log.record(format!("pipette.start_at_tip({})", row.index));
        self.start_row = Some(row.clone());
        Ok(())
    }
}

/// 模拟枪头盒（行优先，标准 9mm 间距）
#[derive(Debug, Clone)]
pub struct MockTipRack {
    name: String,
    rows: usize,
    columns: usize,
    origin: Vector,
    spacing: f64,
}

impl MockTipRack {
    /// 标准 96 孔枪头盒（8 排 × 12 列）
    pub fn standard_96(name: impl Into<String>) -> Self {
        Self::new(name, 8, 12)
    }

    pub fn new(name: impl Into<String>, rows: usize, columns: usize) -> Self {
        Self {
            name: name.into(),
            rows,
            columns,
            origin: Vector::ZERO,
            spacing: 9.0,
        }
    }

    pub fn with_origin(mut self, origin: Vector) -> Self {
        self.origin = origin;
        self
    }

    fn well_at(&self, row: usize, column: usize) -> Well {
        let name = format!("{}{}", row_letter(row), column + 1);
        let offset = Vector::new(
            column as f64 * self.spacing,
            row as f64 * self.spacing,
            0.0,
        );
        Well::new(name, self.origin + offset)
    }
}

fn row_letter(row: usize) -> char {
    char::from(b'A' + (row % 26) as u8)
}

impl Labware for MockTipRack {
    fn name(&self) -> &str {
        &self.name
    }

    fn well(&self, index: usize) -> Result<Well, HardwareError> {
        let len = self.rows * self.columns;
        if index >= len {
            return Err(HardwareError::IndexOutOfRange { index, len });
        }
        Ok(self.well_at(index / self.columns, index % self.columns))
    }

    fn row(&self, index: usize) -> Result<Row, HardwareError> {
        if index >= self.rows {
            return Err(HardwareError::IndexOutOfRange {
                index,
                len: self.rows,
            });
        }
        let wells = (0..self.columns).map(|c| self.well_at(index, c)).collect();
        Ok(Row::new(index, wells))
    }

    fn row_count(&self) -> usize {
        self.rows
    }
}

/// 模拟校准存储
#[derive(Debug, Clone)]
pub struct MockCalibration {
    path: PathBuf,
}

impl MockCalibration {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Calibration for MockCalibration {
    fn calibration_file_path(&self) -> PathBuf {
        self.path.clone()
    }
}

/// 模拟控制库
#[derive(Debug, Clone)]
pub struct MockLibrary {
    version: String,
}

impl MockLibrary {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

impl ControlLibrary for MockLibrary {
    fn library_version(&self) -> &str {
        &self.version
    }
}
