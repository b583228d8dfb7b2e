//! Builder 模式实现
//!
//! 提供链式构造 `Invoker` 实例的便捷方式。

use crate::config::{ConfigError, InvokerConfig};
use crate::hooks::{HookManager, TaskObserver};
use crate::invoker::Invoker;
use std::path::Path;
use std::sync::Arc;

/// Invoker Builder（链式构造）
///
/// # Example
///
/// ```rust
/// use otbridge_invoker::Invoker;
///
/// let invoker = Invoker::builder()
///     .daemon_thread_prefix("deck")
///     .stack_size(512 * 1024)
///     .log_failures(false)
///     .build();
///
/// assert_eq!(invoker.config().daemon_thread_prefix, "deck");
/// ```
#[derive(Default)]
pub struct InvokerBuilder {
    config: InvokerConfig,
    hooks: HookManager,
}

impl InvokerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用完整配置（覆盖之前的单项设置）
    pub fn config(mut self, config: InvokerConfig) -> Self {
        self.config = config;
        self
    }

    /// 从 TOML 文件加载配置
    pub fn config_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = InvokerConfig::load_from_file(path)?;
        Ok(self.config(config))
    }

    pub fn daemon_thread_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.daemon_thread_prefix = prefix.into();
        self
    }

    pub fn method_thread_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.method_thread_prefix = prefix.into();
        self
    }

    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.config.stack_size = Some(bytes);
        self
    }

    pub fn log_failures(mut self, enabled: bool) -> Self {
        self.config.log_failures = enabled;
        self
    }

    /// 添加任务观察者
    pub fn observer(mut self, observer: Arc<dyn TaskObserver>) -> Self {
        self.hooks.add_observer(observer);
        self
    }

    pub fn build(self) -> Invoker {
        Invoker::with_hooks(self.config, self.hooks)
    }
}
