//! 工作项（Work Item）定义
//!
//! 工作项是一次延迟执行的调用：闭包已捕获目标对象和自身参数，
//! 执行时再接收调用组共享的参数 `&A`。

use crate::error::CallError;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// 跨线程共享的硬件对象
///
/// 后台调用不施加任何额外的锁策略；多个任务同时操作同一对象时，
/// 锁只保证单次调用的互斥，不保证调用之间的顺序。
pub type Shared<T> = Arc<Mutex<T>>;

/// 包装为 [`Shared`]
pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(Mutex::new(value))
}

type Call<A> = Box<dyn FnOnce(&A) -> Result<(), CallError> + Send>;

/// 单个工作项
pub struct WorkItem<A> {
    label: String,
    call: Call<A>,
}

impl<A: 'static> WorkItem<A> {
    /// 由闭包创建工作项
    pub fn new<F, E>(label: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(&A) -> Result<(), E> + Send + 'static,
        E: Into<CallError>,
    {
        Self {
            label: label.into(),
            call: Box::new(move |args: &A| f(args).map_err(Into::into)),
        }
    }

    /// 针对独占目标对象的工作项
    pub fn on<O, F, E>(label: impl Into<String>, target: O, f: F) -> Self
    where
        O: Send + 'static,
        F: FnOnce(&mut O, &A) -> Result<(), E> + Send + 'static,
        E: Into<CallError>,
    {
        Self::new(label, move |args| {
            let mut target = target;
            f(&mut target, args)
        })
    }

    /// 针对共享目标对象的工作项（仅在调用期间持锁）
    pub fn locked<O, F, E>(label: impl Into<String>, target: Shared<O>, f: F) -> Self
    where
        O: Send + ?Sized + 'static,
        F: FnOnce(&mut O, &A) -> Result<(), E> + Send + 'static,
        E: Into<CallError>,
    {
        Self::new(label, move |args| {
            let mut guard = target.lock();
            f(&mut *guard, args)
        })
    }
}

impl<A> WorkItem<A> {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// 执行工作项（消费自身）
    pub fn call(self, args: &A) -> Result<(), CallError> {
        (self.call)(args)
    }
}

impl<A> fmt::Debug for WorkItem<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkItem")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// 调用组执行报告
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupReport {
    /// 成功执行的工作项数量
    pub completed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_item_receives_shared_args() {
        let seen = shared(Vec::new());
        let sink = seen.clone();
        let item = WorkItem::new("record", move |speed: &u32| {
            sink.lock().push(*speed);
            Ok::<_, std::io::Error>(())
        });
        assert_eq!(item.label(), "record");
        item.call(&300).unwrap();
        assert_eq!(*seen.lock(), vec![300]);
    }

    #[test]
    fn test_work_item_on_owned_target() {
        let item = WorkItem::on("bump", 1u32, |n: &mut u32, step: &u32| {
            *n += *step;
            if *n > 2 {
                Err(std::io::Error::other("too far"))
            } else {
                Ok(())
            }
        });
        let err = item.call(&5).unwrap_err();
        assert_eq!(err.to_string(), "too far");
    }

    #[test]
    fn test_work_item_locked_target() {
        let target = shared(0i32);
        let item = WorkItem::locked("set", target.clone(), |n: &mut i32, v: &i32| {
            *n = *v;
            Ok::<_, std::io::Error>(())
        });
        item.call(&-4).unwrap();
        assert_eq!(*target.lock(), -4);
    }

    #[test]
    fn test_work_item_debug_hides_closure() {
        let item = WorkItem::new("noop", |_: &()| Ok::<_, std::io::Error>(()));
        let dbg = format!("{:?}", item);
        assert!(dbg.contains("noop"));
    }
}
