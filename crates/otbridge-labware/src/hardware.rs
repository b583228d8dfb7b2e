//! 硬件对象接口
//!
//! 机器人、底层驱动、移液器、校准对象与控制库信息。实现方通常是对真实控制库的绑定；
//! 测试中使用 [`mock`](crate::mock) 模块。

use crate::error::HardwareError;
use crate::labware::Row;
use std::path::PathBuf;
use std::sync::Arc;

/// 底层运动驱动
///
/// 急停必须能在 `Robot::run()` 阻塞期间从其他线程调用，
/// 因此驱动以 `Arc` 共享，`halt` 只需要 `&self`。
pub trait RobotDriver: Send + Sync {
    /// 急停
    fn halt(&self) -> Result<(), HardwareError>;

    /// 是否处于急停状态
    fn is_halted(&self) -> bool {
        false
    }
}

/// 机器人
///
/// `run()` 是阻塞调用：执行已排队的全部运动指令后才返回。
pub trait Robot: Send {
    /// 执行已排队的运动
    fn run(&mut self) -> Result<(), HardwareError>;

    /// 底层驱动（用于急停等低层操作）
    fn driver(&self) -> Arc<dyn RobotDriver>;

    /// 回零
    ///
    /// 默认实现直接调用 `run()`，由实现者在需要时覆盖。
    fn home(&mut self) -> Result<(), HardwareError> {
        self.run()
    }
}

/// 移液器
pub trait Pipette: Send {
    /// 设置起始取枪头的位置（多通道移液器以排为单位）
    fn start_at_tip(&mut self, row: &Row) -> Result<(), HardwareError>;
}

/// 校准数据存储
pub trait Calibration {
    /// 校准数据文件路径
    fn calibration_file_path(&self) -> PathBuf;
}

/// 外部控制库本身的信息
pub trait ControlLibrary {
    /// 已安装控制库的版本字符串（如 `"3.21.2"`）
    fn library_version(&self) -> &str;
}

impl<R: Robot + ?Sized> Robot for Box<R> {
    fn run(&mut self) -> Result<(), HardwareError> {
        (**self).run()
    }

    fn driver(&self) -> Arc<dyn RobotDriver> {
        (**self).driver()
    }

    fn home(&mut self) -> Result<(), HardwareError> {
        (**self).home()
    }
}

impl<P: Pipette + ?Sized> Pipette for Box<P> {
    fn start_at_tip(&mut self, row: &Row) -> Result<(), HardwareError> {
        (**self).start_at_tip(row)
    }
}
