//! Schema 元素标识与分类

use serde::{Deserialize, Serialize};
use std::fmt;

/// Schema 元素 ID
///
/// 0 为保留值，不允许显式指定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaId(i64);

impl SchemaId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Schema 元素类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaType {
    #[serde(rename = "property_key")]
    PropertyKey,
    #[serde(rename = "vertex_label")]
    VertexLabel,
    #[serde(rename = "edge_label")]
    EdgeLabel,
    #[serde(rename = "index_label")]
    IndexLabel,
}

impl SchemaType {
    /// 可读名称，用于错误消息
    pub fn readable_name(&self) -> &'static str {
        match self {
            SchemaType::PropertyKey => "属性键",
            SchemaType::VertexLabel => "顶点标签",
            SchemaType::EdgeLabel => "边标签",
            SchemaType::IndexLabel => "索引标签",
        }
    }

    /// 是否可以作为索引的所属标签
    pub fn is_label(&self) -> bool {
        matches!(self, SchemaType::VertexLabel | SchemaType::EdgeLabel)
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.readable_name())
    }
}

/// 图的运行模式
///
/// 恢复模式下所有 schema 必须显式携带 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GraphMode {
    #[default]
    None,
    Restoring,
    Merging,
}

impl GraphMode {
    pub fn is_restoring(&self) -> bool {
        matches!(self, GraphMode::Restoring)
    }
}
