//! 后台调用器
//!
//! 每次调用创建一个新的具名线程，调用线程从不阻塞。
//! 结果（成功、错误或 panic）经由容量为 1 的通道交给 [`TaskHandle`]。

use crate::builder::InvokerBuilder;
use crate::config::InvokerConfig;
use crate::error::{CallError, InvokeError};
use crate::hooks::{HookManager, TaskObserver};
use crate::metrics::InvokerMetrics;
use crate::task::{TaskHandle, TaskInfo, TaskKind, TaskOutcome, panic_message};
use crate::work::{GroupReport, WorkItem};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::thread;
use tracing::{debug, error};

/// 调用器共享状态（后台线程持有其 `Arc`）
struct InvokerContext {
    config: InvokerConfig,
    hooks: RwLock<HookManager>,
    metrics: Arc<InvokerMetrics>,
    next_id: AtomicU64,
}

impl InvokerContext {
    fn finish(&self, info: &TaskInfo, outcome: &TaskOutcome) {
        let counter = match outcome {
            TaskOutcome::Succeeded => &self.metrics.tasks_succeeded,
            TaskOutcome::Failed(_) => &self.metrics.tasks_failed,
            TaskOutcome::Panicked(_) => &self.metrics.tasks_panicked,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        match outcome {
            TaskOutcome::Succeeded => {
                debug!(task = info.id, name = %info.name, label = %info.label, "background task finished");
            },
            TaskOutcome::Failed(msg) | TaskOutcome::Panicked(msg) if self.config.log_failures => {
                error!(
                    task = info.id,
                    name = %info.name,
                    label = %info.label,
                    error = %msg,
                    "background task failed"
                );
            },
            _ => {},
        }

        self.notify(info, "on_finished", |hooks| hooks.trigger_finished(info, outcome));
    }

    /// 执行观察者回调；回调 panic 只记录日志，不影响任务本身的结果
    fn notify(&self, info: &TaskInfo, hook: &'static str, f: impl FnOnce(&HookManager)) {
        let Ok(hooks) = self.hooks.read() else {
            return;
        };
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| f(&hooks))) {
            self.metrics.observer_panics.fetch_add(1, Ordering::Relaxed);
            error!(
                task = info.id,
                name = %info.name,
                hook,
                error = %panic_message(payload.as_ref()),
                "task observer panicked"
            );
        }
    }
}

/// 后台调用器
///
/// 克隆开销很小（共享同一份配置、钩子与指标）。
///
/// # Example
///
/// ```rust
/// use otbridge_invoker::{Invoker, InvokerConfig};
///
/// let invoker = Invoker::new(InvokerConfig::default());
/// let handle = invoker
///     .spawn_method("scale", 3.0f64, 2.0f64, |base, factor| {
///         Ok::<_, std::io::Error>(*base * factor)
///     })
///     .unwrap();
/// assert!(handle.name().starts_with("methDaemon-"));
/// assert_eq!(handle.join().unwrap(), 6.0);
/// ```
#[derive(Clone)]
pub struct Invoker {
    ctx: Arc<InvokerContext>,
}

impl Default for Invoker {
    fn default() -> Self {
        Self::new(InvokerConfig::default())
    }
}

impl Invoker {
    pub fn new(config: InvokerConfig) -> Self {
        Self::with_hooks(config, HookManager::new())
    }

    pub fn builder() -> InvokerBuilder {
        InvokerBuilder::new()
    }

    pub(crate) fn with_hooks(config: InvokerConfig, hooks: HookManager) -> Self {
        Self {
            ctx: Arc::new(InvokerContext {
                config,
                hooks: RwLock::new(hooks),
                metrics: Arc::new(InvokerMetrics::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    pub fn config(&self) -> &InvokerConfig {
        &self.ctx.config
    }

    pub fn metrics(&self) -> &InvokerMetrics {
        &self.ctx.metrics
    }

    /// 运行时添加观察者（只影响之后启动的任务）
    pub fn add_observer(&self, observer: Arc<dyn TaskObserver>) {
        if let Ok(mut hooks) = self.ctx.hooks.write() {
            hooks.add_observer(observer);
        }
    }

    /// 在新线程上执行一次调用
    ///
    /// `f` 对 `target` 恰好调用一次。返回值与错误都进入句柄。
    pub fn spawn_call<O, T, E, F>(
        &self,
        label: impl Into<String>,
        target: O,
        f: F,
    ) -> Result<TaskHandle<T>, InvokeError>
    where
        O: Send + 'static,
        T: Send + 'static,
        E: Into<CallError>,
        F: FnOnce(&mut O) -> Result<T, E> + Send + 'static,
    {
        self.spawn(TaskKind::Call, label, move || {
            let mut target = target;
            f(&mut target).map_err(InvokeError::call)
        })
    }

    /// 在新线程上执行带参数的任意方法调用
    pub fn spawn_method<O, A, T, E, F>(
        &self,
        label: impl Into<String>,
        target: O,
        args: A,
        f: F,
    ) -> Result<TaskHandle<T>, InvokeError>
    where
        O: Send + 'static,
        A: Send + 'static,
        T: Send + 'static,
        E: Into<CallError>,
        F: FnOnce(&mut O, A) -> Result<T, E> + Send + 'static,
    {
        self.spawn(TaskKind::Method, label, move || {
            let mut target = target;
            f(&mut target, args).map_err(InvokeError::call)
        })
    }

    /// 在同一个新线程上按顺序执行调用组
    ///
    /// 每一项都收到共享参数 `&args`。首个失败项终止整个组，
    /// 句柄得到 [`InvokeError::ItemFailed`]；某项 panic 同样终止整个组，
    /// 得到带有该项序号与标签的 [`InvokeError::Panicked`]。
    pub fn spawn_group<A>(
        &self,
        items: Vec<WorkItem<A>>,
        args: A,
    ) -> Result<TaskHandle<GroupReport>, InvokeError>
    where
        A: Send + 'static,
    {
        let label = group_label(&items);
        let metrics = self.ctx.metrics.clone();

        self.spawn(TaskKind::Group, label, move || {
            let mut completed = 0;
            for (index, item) in items.into_iter().enumerate() {
                let label = item.label().to_owned();
                debug!(index, label = %label, "running work item");
                match panic::catch_unwind(AssertUnwindSafe(|| item.call(&args))) {
                    Ok(Ok(())) => {},
                    Ok(Err(source)) => {
                        return Err(InvokeError::ItemFailed {
                            index,
                            label,
                            source,
                        });
                    },
                    Err(payload) => {
                        return Err(InvokeError::Panicked(format!(
                            "item {index} ({label}): {}",
                            panic_message(payload.as_ref())
                        )));
                    },
                }
                completed += 1;
                metrics.group_items_completed.fetch_add(1, Ordering::Relaxed);
            }
            Ok(GroupReport { completed })
        })
    }

    /// 通用启动入口
    ///
    /// 线程名称为 `{prefix}-{id}`；panic 被捕获并转换为 [`InvokeError::Panicked`]。
    pub fn spawn<T, F>(
        &self,
        kind: TaskKind,
        label: impl Into<String>,
        f: F,
    ) -> Result<TaskHandle<T>, InvokeError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, InvokeError> + Send + 'static,
    {
        let ctx = self.ctx.clone();
        let id = ctx.next_id.fetch_add(1, Ordering::Relaxed);
        let prefix = match kind {
            TaskKind::Call | TaskKind::Group => &ctx.config.daemon_thread_prefix,
            TaskKind::Method => &ctx.config.method_thread_prefix,
        };
        let info = TaskInfo {
            id,
            kind,
            name: format!("{prefix}-{id}"),
            label: label.into(),
        };

        let mut builder = thread::Builder::new().name(info.name.clone());
        if let Some(stack_size) = ctx.config.stack_size {
            builder = builder.stack_size(stack_size);
        }

        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        let thread_info = info.clone();
        let thread_ctx = ctx.clone();

        let thread = builder
            .spawn(move || {
                thread_ctx.notify(&thread_info, "on_started", |hooks| {
                    hooks.trigger_started(&thread_info)
                });

                let result = panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
                    Err(InvokeError::Panicked(panic_message(payload.as_ref())))
                });

                thread_ctx.finish(&thread_info, &TaskOutcome::from_result(&result));
                // 句柄可能已 detach，接收端不存在时忽略
                let _ = done_tx.send(result);
            })
            .map_err(InvokeError::Spawn)?;

        ctx.metrics.tasks_spawned.fetch_add(1, Ordering::Relaxed);
        debug!(task = id, name = %info.name, kind = %kind, label = %info.label, "background task spawned");

        Ok(TaskHandle::new(info, done_rx, thread, ctx.metrics.clone()))
    }
}

fn group_label<A>(items: &[WorkItem<A>]) -> String {
    let labels: Vec<&str> = items.iter().map(WorkItem::label).collect();
    format!("[{}]", labels.join(", "))
}
