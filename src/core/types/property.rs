//! 属性键定义

use serde::{Deserialize, Serialize};
use std::fmt;

use super::schema_type::SchemaId;

/// 属性值的数据类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    Byte,
    Int,
    Long,
    Float,
    Double,
    Text,
    Blob,
    Date,
    Uuid,
    Object,
}

impl DataType {
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            DataType::Byte | DataType::Int | DataType::Long | DataType::Float | DataType::Double
        )
    }

    pub fn is_date(&self) -> bool {
        matches!(self, DataType::Date)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, DataType::Text)
    }

    /// 数值或日期类型，可以建立范围索引
    pub fn is_numeric_or_date(&self) -> bool {
        self.is_number() || self.is_date()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Boolean => "BOOLEAN",
            DataType::Byte => "BYTE",
            DataType::Int => "INT",
            DataType::Long => "LONG",
            DataType::Float => "FLOAT",
            DataType::Double => "DOUBLE",
            DataType::Text => "TEXT",
            DataType::Blob => "BLOB",
            DataType::Date => "DATE",
            DataType::Uuid => "UUID",
            DataType::Object => "OBJECT",
        };
        write!(f, "{}", name)
    }
}

/// 属性基数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cardinality {
    #[default]
    Single,
    List,
    Set,
}

/// 属性键
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyKey {
    pub id: SchemaId,
    pub name: String,
    pub data_type: DataType,
    pub cardinality: Cardinality,
}

impl PropertyKey {
    pub fn new(id: SchemaId, name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            id,
            name: name.into(),
            data_type,
            cardinality: Cardinality::Single,
        }
    }

    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }
}
