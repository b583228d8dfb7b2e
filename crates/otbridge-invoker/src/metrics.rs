//! 后台调用指标
//!
//! 原子计数器，可在任意线程读取，不引入锁竞争。

use std::sync::atomic::{AtomicU64, Ordering};

/// 后台调用实时指标
///
/// # 使用示例
///
/// ```rust
/// use otbridge_invoker::Invoker;
///
/// let invoker = Invoker::default();
/// invoker
///     .spawn_call("noop", (), |_| Ok::<_, std::io::Error>(()))
///     .unwrap()
///     .join()
///     .unwrap();
///
/// let snapshot = invoker.metrics().snapshot();
/// assert_eq!(snapshot.tasks_spawned, 1);
/// assert_eq!(snapshot.tasks_succeeded, 1);
/// ```
#[derive(Debug, Default)]
pub struct InvokerMetrics {
    /// 已启动的任务数
    pub tasks_spawned: AtomicU64,

    /// 成功完成的任务数
    pub tasks_succeeded: AtomicU64,

    /// 返回错误的任务数
    pub tasks_failed: AtomicU64,

    /// panic 的任务数
    pub tasks_panicked: AtomicU64,

    /// 调用组中成功执行的工作项总数
    pub group_items_completed: AtomicU64,

    /// 未被 join/detach 就被丢弃的句柄数
    pub handles_dropped_unobserved: AtomicU64,

    /// 观察者回调 panic 的次数
    pub observer_panics: AtomicU64,
}

impl InvokerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            tasks_spawned: self.tasks_spawned.load(Ordering::Relaxed),
            tasks_succeeded: self.tasks_succeeded.load(Ordering::Relaxed),
            tasks_failed: self.tasks_failed.load(Ordering::Relaxed),
            tasks_panicked: self.tasks_panicked.load(Ordering::Relaxed),
            group_items_completed: self.group_items_completed.load(Ordering::Relaxed),
            handles_dropped_unobserved: self.handles_dropped_unobserved.load(Ordering::Relaxed),
            observer_panics: self.observer_panics.load(Ordering::Relaxed),
        }
    }

    /// 重置所有计数器
    pub fn reset(&self) {
        self.tasks_spawned.store(0, Ordering::Relaxed);
        self.tasks_succeeded.store(0, Ordering::Relaxed);
        self.tasks_failed.store(0, Ordering::Relaxed);
        self.tasks_panicked.store(0, Ordering::Relaxed);
        self.group_items_completed.store(0, Ordering::Relaxed);
        self.handles_dropped_unobserved.store(0, Ordering::Relaxed);
        self.observer_panics.store(0, Ordering::Relaxed);
    }
}

/// 指标快照（不可变）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub tasks_spawned: u64,
    pub tasks_succeeded: u64,
    pub tasks_failed: u64,
    pub tasks_panicked: u64,
    pub group_items_completed: u64,
    pub handles_dropped_unobserved: u64,
    pub observer_panics: u64,
}

impl MetricsSnapshot {
    /// 已结束（成功 + 失败 + panic）的任务数
    pub fn tasks_finished(&self) -> u64 {
        self.tasks_succeeded + self.tasks_failed + self.tasks_panicked
    }

    /// 仍在运行的任务数（近似值）
    pub fn tasks_in_flight(&self) -> u64 {
        self.tasks_spawned.saturating_sub(self.tasks_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_snapshot_and_reset() {
        let metrics = InvokerMetrics::new();
        metrics.tasks_spawned.fetch_add(3, Ordering::Relaxed);
        metrics.tasks_succeeded.fetch_add(1, Ordering::Relaxed);
        metrics.tasks_failed.fetch_add(1, Ordering::Relaxed);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.tasks_finished(), 2);
        assert_eq!(snapshot.tasks_in_flight(), 1);

        metrics.reset();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }
}
