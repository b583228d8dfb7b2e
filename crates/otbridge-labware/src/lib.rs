//! # otbridge Labware
//!
//! 液体处理机器人外部对象模型（无硬件依赖）
//!
//! ## 模块
//!
//! - `vector`: 三维坐标向量及字段替换
//! - `labware`: 孔位（Well）、排（Row）与容器（Labware）抽象
//! - `hardware`: 机器人、驱动、移液器、校准对象、控制库信息的 trait
//! - `mock`: 内存中的模拟实现（`mock` feature）
//!
//! 本 crate 只定义接口形状，不重建底层控制库的行为。

mod error;
pub mod hardware;
pub mod labware;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod vector;

pub use error::HardwareError;
pub use hardware::{Calibration, ControlLibrary, Pipette, Robot, RobotDriver};
pub use labware::{Labware, Row, Well};
pub use vector::{Vector, VectorPatch};
