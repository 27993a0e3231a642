//! 存储层错误类型
//!
//! 涵盖元数据目录与索引数据存储相关的错误

use thiserror::Error;

/// 存储层结果类型
pub type StorageResult<T> = Result<T, StorageError>;

/// 存储层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("数据库错误: {0}")]
    DbError(String),
    #[error("未找到: {0}")]
    NotFound(String),
    #[error("已存在: {0}")]
    AlreadyExists(String),
    #[error("无效输入: {0}")]
    InvalidInput(String),
    #[error("索引错误: {0}")]
    IndexError(String),
    #[error("操作不支持: {0}")]
    NotSupported(String),
}

impl From<String> for StorageError {
    fn from(s: String) -> Self {
        StorageError::DbError(s)
    }
}

impl From<&str> for StorageError {
    fn from(s: &str) -> Self {
        StorageError::DbError(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::NotFound("index label 'byAge'".to_string());
        assert_eq!(err.to_string(), "未找到: index label 'byAge'");
    }

    #[test]
    fn test_storage_error_from_string() {
        let err: StorageError = "disk failure".into();
        assert_eq!(err, StorageError::DbError("disk failure".to_string()));
    }
}
