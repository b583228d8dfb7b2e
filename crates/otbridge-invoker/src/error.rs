//! 后台调用错误类型定义

use thiserror::Error;

/// 调用方闭包返回的错误（类型擦除）
pub type CallError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// 后台调用错误类型
#[derive(Error, Debug)]
pub enum InvokeError {
    /// 操作系统拒绝创建线程
    #[error("Failed to spawn background thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// 被调用的方法返回错误
    #[error("Background call failed: {0}")]
    Call(#[source] CallError),

    /// 调用组中的某一项失败（后续项不会执行）
    #[error("Work item #{index} ({label}) failed: {source}")]
    ItemFailed {
        index: usize,
        label: String,
        #[source]
        source: CallError,
    },

    /// 后台线程 panic
    #[error("Background thread panicked: {0}")]
    Panicked(String),

    /// 等待超时（后台线程继续运行）
    #[error("Operation timeout")]
    Timeout,

    /// 完成通道断开，未收到结果
    #[error("Completion channel disconnected")]
    Disconnected,
}

impl InvokeError {
    /// 包装调用方错误
    pub fn call(err: impl Into<CallError>) -> Self {
        Self::Call(err.into())
    }

    /// 是否由调用本身失败引起（而非线程/通道问题）
    pub fn is_call_failure(&self) -> bool {
        matches!(self, Self::Call(_) | Self::ItemFailed { .. })
    }
}
