//! 任务句柄

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::scheduler::TaskScheduler;
use super::types::{TaskId, TaskInfo, TaskStatus};
use crate::core::TaskResult;

/// 已提交任务的句柄
///
/// `poll` 非阻塞地查询状态，`wait` 在超时时间内阻塞等待任务结束
#[derive(Clone)]
pub struct TaskHandle {
    id: TaskId,
    scheduler: Arc<dyn TaskScheduler>,
}

impl TaskHandle {
    pub fn new(id: TaskId, scheduler: Arc<dyn TaskScheduler>) -> Self {
        Self { id, scheduler }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn poll(&self) -> TaskResult<TaskStatus> {
        self.scheduler.task(self.id).map(|info| info.status)
    }

    pub fn info(&self) -> TaskResult<TaskInfo> {
        self.scheduler.task(self.id)
    }

    pub fn wait(&self, timeout: Duration) -> TaskResult<TaskInfo> {
        self.scheduler.wait_until_completed(self.id, timeout)
    }

    /// 从调度器中移除已结束的任务
    pub fn delete(&self) -> TaskResult<TaskInfo> {
        self.scheduler.delete(self.id)
    }
}

impl PartialEq for TaskHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TaskHandle").field(&self.id).finish()
    }
}
