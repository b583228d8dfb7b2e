//! 辅助函数
//!
//! 对外部对象模型的薄封装。同步函数立即把错误返回给调用方；
//! `run_*` 系列在新线程上执行并返回 [`TaskHandle`]。
//!
//! # 示例
//!
//! ```rust,ignore
//! use otbridge_sdk::helpers::*;
//! use otbridge_sdk::{Invoker, shared};
//!
//! let invoker = Invoker::default();
//! let robot = shared(robot);
//! let driver = robot.lock().driver();
//!
//! let motion = run_in_background(&invoker, robot.clone())?;
//! if operator_pressed_stop() {
//!     halt_driver(driver.as_ref())?;
//! }
//! motion.join()?;
//! ```

use otbridge_invoker::{CallError, GroupReport, InvokeError, Invoker, Shared, TaskHandle, WorkItem};
use otbridge_labware::{
    Calibration, HardwareError, Labware, Pipette, Robot, RobotDriver, Row, Vector, VectorPatch,
    Well,
};
use std::path::PathBuf;
use tracing::{debug, warn};

/// 按位置索引取孔位
pub fn get_well<L: Labware + ?Sized>(labware: &L, index: usize) -> Result<Well, HardwareError> {
    labware.well(index)
}

/// 校准数据文件路径
pub fn calibration_file_path<C: Calibration + ?Sized>(calibration: &C) -> PathBuf {
    calibration.calibration_file_path()
}

/// 替换向量的部分字段，返回新向量
pub fn update_vector(vector: Vector, patch: VectorPatch) -> Vector {
    vector.replace(patch)
}

/// 由可选分量构造向量（缺省分量为 0.0）
pub fn xyz_to_vector(x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Vector {
    Vector::from_components(x, y, z)
}

/// 在后台线程上执行 `robot.run()`
///
/// 立即返回；急停请事先取得 `robot.lock().driver()`，
/// 运动期间机器人锁被后台线程持有。
pub fn run_in_background<R>(
    invoker: &Invoker,
    robot: Shared<R>,
) -> Result<TaskHandle<()>, InvokeError>
where
    R: Robot + ?Sized + 'static,
{
    invoker.spawn_call("robot.run", robot, |robot| robot.lock().run())
}

/// 在同一个后台线程上按顺序执行一组调用（共享参数 `args`）
pub fn run_group<A>(
    invoker: &Invoker,
    items: Vec<WorkItem<A>>,
    args: A,
) -> Result<TaskHandle<GroupReport>, InvokeError>
where
    A: Send + 'static,
{
    invoker.spawn_group(items, args)
}

/// 在后台线程上执行任意方法调用
pub fn run_method<O, A, T, E, F>(
    invoker: &Invoker,
    label: impl Into<String>,
    target: O,
    args: A,
    f: F,
) -> Result<TaskHandle<T>, InvokeError>
where
    O: Send + 'static,
    A: Send + 'static,
    T: Send + 'static,
    E: Into<CallError>,
    F: FnOnce(&mut O, A) -> Result<T, E> + Send + 'static,
{
    invoker.spawn_method(label, target, args, f)
}

/// 急停（同步）
pub fn halt<R: Robot + ?Sized>(robot: &R) -> Result<(), HardwareError> {
    halt_driver(robot.driver().as_ref())
}

/// 通过已取得的驱动急停（机器人正被后台线程占用时使用）
pub fn halt_driver(driver: &dyn RobotDriver) -> Result<(), HardwareError> {
    warn!("emergency halt requested");
    driver.halt()
}

/// 设置多通道移液器的起始枪头排
pub fn update_multichannel_start_row<P, L>(
    pipette: &mut P,
    tip_rack: &L,
    row: usize,
) -> Result<(), HardwareError>
where
    P: Pipette + ?Sized,
    L: Labware + ?Sized,
{
    let row = tip_rack.row(row)?;
    debug!(tip_rack = tip_rack.name(), row = row.index, "set multichannel start row");
    pipette.start_at_tip(&row)
}

/// 取枪头盒的一整排
pub fn get_row<L: Labware + ?Sized>(tip_rack: &L, row: usize) -> Result<Row, HardwareError> {
    tip_rack.row(row)
}
