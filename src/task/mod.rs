//! 后台任务模块
//!
//! 提供索引重建与删除任务的提交、状态查询与带超时的同步等待

pub mod handle;
pub mod scheduler;
pub mod types;

pub use handle::TaskHandle;
pub use scheduler::{TaskScheduler, TokioTaskScheduler};
pub use types::{IndexTask, TaskId, TaskInfo, TaskStatus, TaskType, TaskWork};
