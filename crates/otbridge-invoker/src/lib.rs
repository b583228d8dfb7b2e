//! 后台调用模块
//!
//! 本模块在独立线程上执行针对外部硬件对象的调用，并立即返回任务句柄：
//! - 单次调用（`spawn_call`）
//! - 带参数的任意方法调用（`spawn_method`）
//! - 按顺序执行的调用组（`spawn_group`），首个失败即终止
//!
//! 与"发射后不管"不同，每个任务的结果（包括 panic）都会进入 [`TaskHandle`]，
//! 调用方必须显式 `join` 或 `detach`。
//!
//! # 使用示例
//!
//! ```rust
//! use otbridge_invoker::{Invoker, WorkItem};
//!
//! let invoker = Invoker::default();
//!
//! let handle = invoker
//!     .spawn_call("count", 41u32, |n| Ok::<_, std::io::Error>(*n + 1))
//!     .unwrap();
//! assert_eq!(handle.join().unwrap(), 42);
//!
//! let items = vec![
//!     WorkItem::new("first", |step: &u32| Ok::<_, std::io::Error>(assert_eq!(*step, 5))),
//!     WorkItem::new("second", |_: &u32| Ok::<_, std::io::Error>(())),
//! ];
//! let report = invoker.spawn_group(items, 5u32).unwrap().join().unwrap();
//! assert_eq!(report.completed, 2);
//! ```

mod builder;
pub mod config;
mod error;
pub mod hooks;
mod invoker;
pub mod metrics;
pub mod task;
pub mod work;

pub use builder::InvokerBuilder;
pub use config::{ConfigError, InvokerConfig};
pub use error::{CallError, InvokeError};
pub use hooks::{HookManager, TaskObserver};
pub use invoker::Invoker;
pub use metrics::{InvokerMetrics, MetricsSnapshot};
pub use task::{TaskHandle, TaskInfo, TaskKind, TaskOutcome};
pub use work::{GroupReport, Shared, WorkItem, shared};
