//! 错误处理
//!
//! 每一层使用独立的 thiserror 枚举：
//! - `SchemaError`：索引标签定义、校验与创建流程
//! - `StorageError`：元数据目录与索引数据存储
//! - `TaskError`：后台任务提交与等待

pub mod schema;
pub mod storage;
pub mod task;

pub use schema::{SchemaError, SchemaResult};
pub use storage::{StorageError, StorageResult};
pub use task::{TaskError, TaskResult};
