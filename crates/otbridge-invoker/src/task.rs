//! 任务句柄与任务描述
//!
//! [`TaskHandle`] 持有后台线程的 `JoinHandle` 与一个容量为 1 的完成通道。
//! 句柄被标记为 `#[must_use]`：调用方必须 `join`/`join_timeout` 观察结果，
//! 或 `detach` 显式放弃。未经观察就被丢弃的句柄会记录一条警告。

use crate::error::InvokeError;
use crate::metrics::InvokerMetrics;
use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, warn};

/// 任务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// 单次调用
    Call,
    /// 带参数的任意方法调用
    Method,
    /// 按顺序执行的调用组
    Group,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Call => write!(f, "call"),
            TaskKind::Method => write!(f, "method"),
            TaskKind::Group => write!(f, "group"),
        }
    }
}

/// 任务描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInfo {
    /// 任务编号（同一 `Invoker` 内单调递增）
    pub id: u64,
    pub kind: TaskKind,
    /// 后台线程名称
    pub name: String,
    /// 调用方给出的标签（如 "robot.run"）
    pub label: String,
}

/// 任务结果摘要（供钩子和日志使用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Succeeded,
    Failed(String),
    Panicked(String),
}

impl TaskOutcome {
    pub fn from_result<T>(result: &Result<T, InvokeError>) -> Self {
        match result {
            Ok(_) => TaskOutcome::Succeeded,
            Err(InvokeError::Panicked(msg)) => TaskOutcome::Panicked(msg.clone()),
            Err(e) => TaskOutcome::Failed(e.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Succeeded)
    }
}

/// 提取 panic 负载中的消息
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// 后台任务句柄
#[must_use = "background failures are only visible through the handle; call `join` or `detach`"]
pub struct TaskHandle<T> {
    info: TaskInfo,
    rx: Receiver<Result<T, InvokeError>>,
    thread: Option<JoinHandle<()>>,
    /// 已从通道取出、尚未交给调用方的结果
    result: Option<Result<T, InvokeError>>,
    observed: bool,
    metrics: Arc<InvokerMetrics>,
}

impl<T> TaskHandle<T> {
    pub(crate) fn new(
        info: TaskInfo,
        rx: Receiver<Result<T, InvokeError>>,
        thread: JoinHandle<()>,
        metrics: Arc<InvokerMetrics>,
    ) -> Self {
        Self {
            info,
            rx,
            thread: Some(thread),
            result: None,
            observed: false,
            metrics,
        }
    }

    pub fn info(&self) -> &TaskInfo {
        &self.info
    }

    pub fn id(&self) -> u64 {
        self.info.id
    }

    /// 后台线程名称
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// 后台线程是否已退出
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(|t| t.is_finished())
    }

    /// 最多等待 `timeout`，返回任务是否已完成
    ///
    /// 不消费结果，之后仍可调用 `join()`。
    pub fn wait_timeout(&mut self, timeout: Duration) -> bool {
        if self.result.is_some() {
            return true;
        }
        match self.rx.recv_timeout(timeout) {
            Ok(result) => {
                self.result = Some(result);
                true
            },
            Err(RecvTimeoutError::Timeout) => false,
            // 发送端已释放：线程已结束（结果在 join 时从线程状态恢复）
            Err(RecvTimeoutError::Disconnected) => true,
        }
    }

    /// 阻塞等待任务完成并取得结果
    pub fn join(mut self) -> Result<T, InvokeError> {
        self.observed = true;
        let thread_result = self.thread.take().map(|t| t.join());

        if let Some(result) = self.result.take() {
            return result;
        }
        match self.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => match thread_result {
                // 钩子内 panic 时结果未发送
                Some(Err(payload)) => Err(InvokeError::Panicked(panic_message(payload.as_ref()))),
                _ => Err(InvokeError::Disconnected),
            },
        }
    }

    /// 带超时的 join
    ///
    /// 超时返回 [`InvokeError::Timeout`]，后台线程继续运行直至结束（不可取消）。
    pub fn join_timeout(mut self, timeout: Duration) -> Result<T, InvokeError> {
        if self.wait_timeout(timeout) {
            self.join()
        } else {
            debug!(task = self.info.id, name = %self.info.name, "join timed out, detaching");
            self.observed = true;
            Err(InvokeError::Timeout)
        }
    }

    /// 显式放弃结果，后台线程继续运行
    pub fn detach(mut self) {
        debug!(task = self.info.id, name = %self.info.name, "task detached");
        self.observed = true;
    }
}

impl<T> fmt::Debug for TaskHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("info", &self.info)
            .field("finished", &self.is_finished())
            .finish()
    }
}

impl<T> Drop for TaskHandle<T> {
    fn drop(&mut self) {
        if !self.observed {
            self.metrics
                .handles_dropped_unobserved
                .fetch_add(1, Ordering::Relaxed);
            warn!(
                task = self.info.id,
                name = %self.info.name,
                label = %self.info.label,
                "task handle dropped without join or detach; result discarded"
            );
        }
    }
}
