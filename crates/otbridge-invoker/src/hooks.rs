//! 钩子系统（Hook System）
//!
//! 在后台任务开始/结束时触发自定义回调，用于日志、录制或测试断言。
//!
//! 回调在后台线程内同步执行，实现必须尽快返回；
//! 耗时处理请通过 `crossbeam_channel::Sender::try_send` 转交给其他线程。
//! 回调中的 panic 会被捕获并记录（计入 `observer_panics`），不改变任务结果。
//!
//! # 使用示例
//!
//! ```rust
//! use otbridge_invoker::{Invoker, TaskInfo, TaskObserver, TaskOutcome};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! #[derive(Default)]
//! struct FailureCounter(AtomicU64);
//!
//! impl TaskObserver for FailureCounter {
//!     fn on_finished(&self, _info: &TaskInfo, outcome: &TaskOutcome) {
//!         if !outcome.is_success() {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//! }
//!
//! let counter = Arc::new(FailureCounter::default());
//! let invoker = Invoker::builder().observer(counter.clone()).build();
//! let _ = invoker
//!     .spawn_call("fail", (), |_| Err::<(), _>(std::io::Error::other("no tips")))
//!     .unwrap()
//!     .join();
//! assert_eq!(counter.0.load(Ordering::Relaxed), 1);
//! ```

use crate::task::{TaskInfo, TaskOutcome};
use std::sync::Arc;

/// 任务生命周期回调
pub trait TaskObserver: Send + Sync {
    /// 后台线程开始执行任务时调用（在后台线程中）
    fn on_started(&self, info: &TaskInfo) {
        let _ = info;
    }

    /// 任务结束时调用（在后台线程中，结果发送给句柄之前）
    fn on_finished(&self, info: &TaskInfo, outcome: &TaskOutcome);
}

/// 钩子管理器
///
/// 回调列表本身不是线程安全的，需要外部同步（`Invoker` 内部使用 `RwLock<HookManager>`）。
#[derive(Default)]
pub struct HookManager {
    observers: Vec<Arc<dyn TaskObserver>>,
}

impl HookManager {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Arc<dyn TaskObserver>) {
        self.observers.push(observer);
    }

    pub fn clear(&mut self) {
        self.observers.clear();
    }

    pub fn trigger_started(&self, info: &TaskInfo) {
        for observer in self.observers.iter() {
            observer.on_started(info);
        }
    }

    pub fn trigger_finished(&self, info: &TaskInfo, outcome: &TaskOutcome) {
        for observer in self.observers.iter() {
            observer.on_finished(info, outcome);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskKind;
    use crossbeam_channel::{Sender, bounded};

    struct ChannelObserver {
        tx: Sender<(u64, TaskOutcome)>,
    }

    impl TaskObserver for ChannelObserver {
        fn on_finished(&self, info: &TaskInfo, outcome: &TaskOutcome) {
            let _ = self.tx.try_send((info.id, outcome.clone()));
        }
    }

    fn info(id: u64) -> TaskInfo {
        TaskInfo {
            id,
            kind: TaskKind::Call,
            name: format!("otDaemon-{id}"),
            label: "robot.run".to_string(),
        }
    }

    #[test]
    fn test_hook_manager_add_and_clear() {
        let mut hooks = HookManager::new();
        assert!(hooks.is_empty());

        let (tx, _rx) = bounded(4);
        hooks.add_observer(Arc::new(ChannelObserver { tx }));
        assert_eq!(hooks.len(), 1);

        hooks.clear();
        assert!(hooks.is_empty());
    }

    #[test]
    fn test_hook_manager_trigger_finished() {
        let mut hooks = HookManager::new();
        let (tx, rx) = bounded(4);
        hooks.add_observer(Arc::new(ChannelObserver { tx }));

        hooks.trigger_started(&info(7));
        assert!(rx.try_recv().is_err());

        hooks.trigger_finished(&info(7), &TaskOutcome::Failed("halted".to_string()));
        let (id, outcome) = rx.try_recv().unwrap();
        assert_eq!(id, 7);
        assert_eq!(outcome, TaskOutcome::Failed("halted".to_string()));
    }
}
