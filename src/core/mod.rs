//! 核心模块：数据模型与错误类型

pub mod error;
pub mod types;

pub use error::{SchemaError, SchemaResult, StorageError, StorageResult, TaskError, TaskResult};
pub use types::*;
