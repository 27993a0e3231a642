//! 索引标签元数据管理
//!
//! - `catalog`: schema 目录的读写契约及内存实现
//! - `transaction`: 目录、任务调度器与索引存储的组合上下文
//! - `builder`: 索引标签的定义、校验、去重与创建流程

pub mod builder;
pub mod catalog;
pub mod transaction;

pub use builder::{CreatedIndexLabel, IndexLabelBuilder};
pub use catalog::{MemorySchemaCatalog, SchemaCatalog};
pub use transaction::SchemaTransaction;
