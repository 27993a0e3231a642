//! 索引标签定义
//!
//! 提供索引类型、schema 状态以及索引标签描述符

use serde::{Deserialize, Serialize};
use std::fmt;

use super::schema_type::{SchemaId, SchemaType};

/// 索引类型
///
/// `Range` 是尚未特化的范围索引请求，确定字段数据类型后
/// 会被替换成 `RangeInt` / `RangeFloat` / `RangeLong` / `RangeDouble` 之一，
/// 不会被持久化。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexType {
    #[default]
    Secondary,
    Range,
    RangeInt,
    RangeFloat,
    RangeLong,
    RangeDouble,
    Search,
    Shard,
    Unique,
}

impl IndexType {
    /// 所有已特化的范围索引类型
    pub const RANGE_TYPES: [IndexType; 4] = [
        IndexType::RangeInt,
        IndexType::RangeFloat,
        IndexType::RangeLong,
        IndexType::RangeDouble,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexType::Secondary => "secondary",
            IndexType::Range => "range",
            IndexType::RangeInt => "range_int",
            IndexType::RangeFloat => "range_float",
            IndexType::RangeLong => "range_long",
            IndexType::RangeDouble => "range_double",
            IndexType::Search => "search",
            IndexType::Shard => "shard",
            IndexType::Unique => "unique",
        }
    }

    pub fn is_secondary(&self) -> bool {
        matches!(self, IndexType::Secondary)
    }

    /// 是否为范围索引（包括未特化的请求）
    pub fn is_range(&self) -> bool {
        matches!(
            self,
            IndexType::Range
                | IndexType::RangeInt
                | IndexType::RangeFloat
                | IndexType::RangeLong
                | IndexType::RangeDouble
        )
    }

    pub fn is_search(&self) -> bool {
        matches!(self, IndexType::Search)
    }

    pub fn is_shard(&self) -> bool {
        matches!(self, IndexType::Shard)
    }

    pub fn is_unique(&self) -> bool {
        matches!(self, IndexType::Unique)
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Schema 状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaStatus {
    #[default]
    Creating,
    Complete,
    Rebuilding,
    Deleting,
    Invalid,
}

impl SchemaStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, SchemaStatus::Complete)
    }
}

impl fmt::Display for SchemaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchemaStatus::Creating => "CREATING",
            SchemaStatus::Complete => "COMPLETE",
            SchemaStatus::Rebuilding => "REBUILDING",
            SchemaStatus::Deleting => "DELETING",
            SchemaStatus::Invalid => "INVALID",
        };
        write!(f, "{}", name)
    }
}

/// 索引标签
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexLabel {
    pub id: SchemaId,
    pub name: String,
    /// 所属标签的类型，顶点标签或边标签
    pub base_type: SchemaType,
    /// 所属标签的 ID
    pub base_value: SchemaId,
    pub index_type: IndexType,
    /// 有序的索引字段（属性键 ID）
    pub index_fields: Vec<SchemaId>,
    pub status: SchemaStatus,
}

impl IndexLabel {
    pub fn new(id: SchemaId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            base_type: SchemaType::VertexLabel,
            base_value: SchemaId::new(0),
            index_type: IndexType::Secondary,
            index_fields: Vec::new(),
            status: SchemaStatus::Creating,
        }
    }

    pub fn on(mut self, base_type: SchemaType, base_value: SchemaId) -> Self {
        self.base_type = base_type;
        self.base_value = base_value;
        self
    }

    pub fn with_index_type(mut self, index_type: IndexType) -> Self {
        self.index_type = index_type;
        self
    }

    pub fn with_status(mut self, status: SchemaStatus) -> Self {
        self.status = status;
        self
    }

    pub fn add_index_field(&mut self, field: SchemaId) {
        self.index_fields.push(field);
    }
}
