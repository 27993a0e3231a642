//! Schema 定义错误类型
//!
//! 涵盖索引标签定义、校验、冗余检测以及同步等待过程中的错误

use thiserror::Error;

use crate::core::error::storage::StorageError;
use crate::core::error::task::TaskError;
use crate::core::types::SchemaType;

/// Schema 操作结果类型
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema 定义错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// 缺少或非法的定义参数
    #[error("定义错误: {0}")]
    Definition(String),

    /// 同名 schema 元素已存在，且要求唯一
    #[error("{schema_type} '{name}' 已存在")]
    Exists { schema_type: SchemaType, name: String },

    /// 引用的属性键或所属标签不存在
    #[error("未找到: {0}")]
    NotFound(String),

    /// 新索引与已有索引重复
    #[error("重复索引: {0}")]
    Redundancy(String),

    #[error("不支持的操作: {0}")]
    UnsupportedOperation(String),

    /// 同步等待超时，后台任务仍在运行
    #[error("等待超时: {0}")]
    Timeout(String),

    #[error("任务错误: {0}")]
    Task(String),

    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),
}

impl SchemaError {
    pub fn is_definition(&self) -> bool {
        matches!(self, SchemaError::Definition(_))
    }

    pub fn is_redundancy(&self) -> bool {
        matches!(self, SchemaError::Redundancy(_))
    }
}

impl From<TaskError> for SchemaError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Timeout { .. } => SchemaError::Timeout(err.to_string()),
            other => SchemaError::Task(other.to_string()),
        }
    }
}
