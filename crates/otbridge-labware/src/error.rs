//! 外部对象模型错误类型定义

use thiserror::Error;

/// 硬件/对象模型错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HardwareError {
    /// 设备返回的错误（由具体实现给出描述）
    #[error("Device error: {0}")]
    Device(String),

    /// 容器索引越界
    #[error("Index {index} out of range (len: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// 移液器没有可用的枪头
    #[error("No tips available")]
    NoTipsAvailable,

    /// 机器人已急停
    #[error("Robot halted")]
    Halted,
}

impl HardwareError {
    /// 便捷构造：设备错误
    pub fn device(message: impl Into<String>) -> Self {
        Self::Device(message.into())
    }
}
