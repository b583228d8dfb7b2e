//! 日志初始化
//!
//! 使用 `tracing-subscriber`（fmt + EnvFilter），并通过 `tracing-log`
//! 把基于 `log` crate 的外部库日志桥接到 `tracing`。
//!
//! 重复调用是安全的：只有第一次调用生效。

use crate::error::SdkError;
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

/// 未设置 `RUST_LOG` 时使用的默认过滤规则
pub const DEFAULT_FILTER: &str = "otbridge_sdk=info,otbridge_invoker=info";

static INIT: OnceLock<Result<(), String>> = OnceLock::new();

/// 使用 `RUST_LOG`（缺省为 [`DEFAULT_FILTER`]）初始化日志
pub fn init_logging() -> Result<(), SdkError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter)
}

/// 使用指定过滤规则初始化日志（如 `"otbridge_invoker=debug"`）
pub fn init_logging_with(directives: &str) -> Result<(), SdkError> {
    let filter = EnvFilter::try_new(directives).map_err(|e| SdkError::Logging(e.to_string()))?;
    install(filter)
}

fn install(filter: EnvFilter) -> Result<(), SdkError> {
    INIT.get_or_init(|| {
        tracing_log::LogTracer::init().map_err(|e| e.to_string())?;
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_thread_names(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber).map_err(|e| e.to_string())
    })
    .clone()
    .map_err(SdkError::Logging)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_directive_is_rejected() {
        assert!(matches!(
            init_logging_with("otbridge_sdk=notalevel"),
            Err(SdkError::Logging(_))
        ));
    }

    // 本测试二进制中没有其他测试安装全局订阅者
    #[test]
    fn test_init_is_idempotent() {
        init_logging_with("otbridge_sdk=debug").unwrap();
        assert_eq!(INIT.get(), Some(&Ok(())));

        init_logging().unwrap();
        init_logging_with("otbridge_invoker=trace").unwrap();
        assert_eq!(INIT.get(), Some(&Ok(())));
    }
}
