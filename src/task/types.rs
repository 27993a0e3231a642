//! 后台任务类型定义

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::StorageResult;

/// 任务 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskType {
    RebuildIndex,
    RemoveIndex,
}

/// 任务状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// 已提交，等待依赖任务结束
    Queued,
    Running,
    Success,
    Failed(String),
}

impl TaskStatus {
    /// 是否已结束（成功或失败）
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Success | TaskStatus::Failed(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TaskStatus::Success)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Queued => write!(f, "Queued"),
            TaskStatus::Running => write!(f, "Running"),
            TaskStatus::Success => write!(f, "Success"),
            TaskStatus::Failed(reason) => write!(f, "Failed({})", reason),
        }
    }
}

/// 任务记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskInfo {
    pub id: TaskId,
    pub task_type: TaskType,
    pub description: String,
    pub dependencies: Vec<TaskId>,
    pub status: TaskStatus,
    pub create_time: DateTime<Local>,
    pub update_time: DateTime<Local>,
}

impl TaskInfo {
    pub fn new(id: TaskId, task_type: TaskType, description: String, dependencies: Vec<TaskId>) -> Self {
        let now = Local::now();
        Self {
            id,
            task_type,
            description,
            dependencies,
            status: TaskStatus::Queued,
            create_time: now,
            update_time: now,
        }
    }
}

/// 任务的实际工作，在阻塞线程池中执行
pub type TaskWork = Box<dyn FnOnce() -> StorageResult<()> + Send + 'static>;

/// 待提交的任务
pub struct IndexTask {
    pub task_type: TaskType,
    pub description: String,
    /// 必须先结束的任务
    pub dependencies: Vec<TaskId>,
    pub work: TaskWork,
}

impl IndexTask {
    pub fn new<F>(task_type: TaskType, description: impl Into<String>, work: F) -> Self
    where
        F: FnOnce() -> StorageResult<()> + Send + 'static,
    {
        Self {
            task_type,
            description: description.into(),
            dependencies: Vec::new(),
            work: Box::new(work),
        }
    }

    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = TaskId>) -> Self {
        self.dependencies.extend(dependencies);
        self
    }
}

impl fmt::Debug for IndexTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexTask")
            .field("task_type", &self.task_type)
            .field("description", &self.description)
            .field("dependencies", &self.dependencies)
            .finish()
    }
}
