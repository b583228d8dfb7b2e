//! # 后台调用配置
//!
//! 线程命名、栈大小以及失败日志策略。可从 TOML 文件加载：
//!
//! ```toml
//! daemon_thread_prefix = "otDaemon"
//! method_thread_prefix = "methDaemon"
//! stack_size = 1048576
//! log_failures = true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// 配置加载/保存错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 后台调用配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvokerConfig {
    /// 单次调用与调用组线程的名称前缀
    pub daemon_thread_prefix: String,

    /// 任意方法调用线程的名称前缀
    pub method_thread_prefix: String,

    /// 后台线程栈大小（字节），`None` 使用系统默认值
    pub stack_size: Option<usize>,

    /// 后台线程内失败时是否记录 `error!` 日志
    ///
    /// 已 `detach` 的任务只能通过日志观察失败。
    pub log_failures: bool,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            daemon_thread_prefix: "otDaemon".to_string(),
            method_thread_prefix: "methDaemon".to_string(),
            stack_size: None,
            log_failures: true,
        }
    }
}

impl InvokerConfig {
    /// 从 TOML 字符串解析（缺省字段取默认值）
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
