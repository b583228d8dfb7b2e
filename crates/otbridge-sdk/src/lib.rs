//! otbridge SDK - 液体处理机器人辅助函数
//!
//! 在外部机器人控制库的对象模型之上提供一组辅助函数：
//! 校准路径查询、坐标向量构造、后台执行运动指令、急停、版本查询，
//! 以及多通道移液器的枪头排索引。
//!
//! # 架构
//!
//! - **对象模型** (`labware`): 机器人、移液器、容器、校准对象的 trait 与值类型
//! - **后台调用** (`invoker`): 新线程执行 + 可观察的任务句柄
//! - **辅助函数** (`helpers`): 面向用户的薄封装
//! - **指令分发** (`command`): 枚举指令 + `Deck` 分发
//!
//! # 快速开始
//!
//! ```rust,ignore
//! use otbridge_sdk::prelude::*;
//!
//! let invoker = Invoker::default();
//! let robot = shared(my_robot);
//!
//! // 后台执行已排队的运动，立即返回
//! let handle = run_in_background(&invoker, robot.clone())?;
//!
//! // ... 其他工作 ...
//!
//! handle.join()?;
//! ```

pub mod command;
mod error;
pub mod helpers;
pub mod logging;
pub mod prelude;
pub mod version;

pub use otbridge_invoker as invoker;
pub use otbridge_labware as labware;

pub use command::{Deck, DeckCommand};
pub use error::SdkError;
pub use otbridge_invoker::{Invoker, InvokeError, Shared, TaskHandle, WorkItem, shared};
pub use otbridge_labware::{HardwareError, Vector, VectorPatch};
pub use version::{SDK_VERSION, parsed_version, sdk_version, version};
