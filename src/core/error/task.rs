//! 后台任务错误类型

use std::time::Duration;

use thiserror::Error;

use crate::task::TaskId;

/// 任务层结果类型
pub type TaskResult<T> = Result<T, TaskError>;

/// 后台任务错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaskError {
    #[error("任务未找到: {0}")]
    NotFound(TaskId),
    #[error("等待任务 {task_id} 完成超时 ({timeout:?})")]
    Timeout { task_id: TaskId, timeout: Duration },
    #[error("任务提交被拒绝: {0}")]
    Rejected(String),
    #[error("任务执行失败: {0}")]
    Execution(String),
}
