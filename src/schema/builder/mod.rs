//! 索引标签构建流水线
//!
//! 构建器 → 字段校验 → 重复检测 → 覆盖处理 → 持久化 → 异步重建

pub mod consistency;
pub mod index_label_builder;
pub mod subsumption;
pub mod validator;

pub use index_label_builder::{CreatedIndexLabel, IndexLabelBuilder};
