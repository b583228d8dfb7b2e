//! SDK 顶层错误类型

use otbridge_invoker::{ConfigError, InvokeError};
use otbridge_labware::HardwareError;
use thiserror::Error;

/// SDK 错误类型
#[derive(Error, Debug)]
pub enum SdkError {
    /// 硬件/对象模型错误
    #[error("Hardware error: {0}")]
    Hardware(#[from] HardwareError),

    /// 后台调用错误
    #[error("Invoke error: {0}")]
    Invoke(#[from] InvokeError),

    /// 配置错误
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// 版本字符串解析失败
    #[error("Invalid version: {0}")]
    Version(#[from] semver::Error),

    /// 日志系统初始化失败
    #[error("Logging init failed: {0}")]
    Logging(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_error_from_conversions() {
        let err: SdkError = HardwareError::Halted.into();
        assert!(matches!(err, SdkError::Hardware(HardwareError::Halted)));
        assert_eq!(err.to_string(), "Hardware error: Robot halted");

        let err: SdkError = InvokeError::Timeout.into();
        assert!(matches!(err, SdkError::Invoke(InvokeError::Timeout)));
    }
}
