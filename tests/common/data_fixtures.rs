//! 测试数据生成模块
//!
//! 提供预置的属性键与标签

use graphschema::core::{Cardinality, DataType};
use graphschema::schema::MemorySchemaCatalog;

/// 预置属性键：(名称, 数据类型, 基数)
pub const PROPERTY_KEYS: [(&str, DataType, Cardinality); 10] = [
    ("name", DataType::Text, Cardinality::Single),
    ("city", DataType::Text, Cardinality::Single),
    ("street", DataType::Text, Cardinality::Single),
    ("age", DataType::Int, Cardinality::Single),
    ("level", DataType::Byte, Cardinality::Single),
    ("lived", DataType::Long, Cardinality::Single),
    ("born", DataType::Date, Cardinality::Single),
    ("rate", DataType::Float, Cardinality::Single),
    ("weight", DataType::Double, Cardinality::Single),
    ("tags", DataType::Text, Cardinality::Set),
];

/// 填充目录
///
/// - person：自动 ID，拥有全部属性
/// - author：主键 (name, city)
/// - knows：边标签
pub fn populate(catalog: &MemorySchemaCatalog) {
    for (name, data_type, cardinality) in PROPERTY_KEYS {
        catalog
            .create_property_key(name, data_type, cardinality)
            .expect("创建属性键失败");
    }
    let all: Vec<&str> = PROPERTY_KEYS.iter().map(|(name, _, _)| *name).collect();
    catalog
        .create_vertex_label("person", &all, &[])
        .expect("创建 person 失败");
    catalog
        .create_vertex_label("author", &["name", "city", "age"], &["name", "city"])
        .expect("创建 author 失败");
    catalog
        .create_edge_label("knows", &["city", "weight", "born"])
        .expect("创建 knows 失败");
}
