//! 顶点标签与边标签
//!
//! 两者共享相同的基础信息（ID、名称、属性、索引集合），
//! 顶点标签额外携带 ID 生成策略与主键。

use serde::{Deserialize, Serialize};

use super::schema_type::{SchemaId, SchemaType};

/// 顶点 ID 生成策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IdStrategy {
    #[default]
    Automatic,
    PrimaryKey,
    Customize,
}

impl IdStrategy {
    pub fn is_primary_key(&self) -> bool {
        matches!(self, IdStrategy::PrimaryKey)
    }
}

/// 标签的变体部分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LabelVariant {
    Vertex {
        id_strategy: IdStrategy,
        /// 主键属性 ID，仅 PrimaryKey 策略下非空
        primary_keys: Vec<SchemaId>,
    },
    Edge,
}

/// 顶点标签或边标签
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaLabel {
    pub id: SchemaId,
    pub name: String,
    /// 标签拥有的属性键 ID
    pub properties: Vec<SchemaId>,
    /// 挂在该标签上的索引标签 ID，保持插入顺序
    pub index_labels: Vec<SchemaId>,
    pub variant: LabelVariant,
}

impl SchemaLabel {
    pub fn vertex(id: SchemaId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            properties: Vec::new(),
            index_labels: Vec::new(),
            variant: LabelVariant::Vertex {
                id_strategy: IdStrategy::Automatic,
                primary_keys: Vec::new(),
            },
        }
    }

    pub fn edge(id: SchemaId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            properties: Vec::new(),
            index_labels: Vec::new(),
            variant: LabelVariant::Edge,
        }
    }

    pub fn with_properties(mut self, properties: impl IntoIterator<Item = SchemaId>) -> Self {
        for id in properties {
            if !self.properties.contains(&id) {
                self.properties.push(id);
            }
        }
        self
    }

    /// 将顶点标签设为主键策略；对边标签无效
    pub fn with_primary_keys(mut self, keys: impl IntoIterator<Item = SchemaId>) -> Self {
        if let LabelVariant::Vertex {
            id_strategy,
            primary_keys,
        } = &mut self.variant
        {
            *id_strategy = IdStrategy::PrimaryKey;
            primary_keys.extend(keys);
        }
        self
    }

    pub fn schema_type(&self) -> SchemaType {
        match self.variant {
            LabelVariant::Vertex { .. } => SchemaType::VertexLabel,
            LabelVariant::Edge => SchemaType::EdgeLabel,
        }
    }

    pub fn is_vertex_label(&self) -> bool {
        matches!(self.variant, LabelVariant::Vertex { .. })
    }

    /// 主键策略下的主键属性 ID；其他情况返回 None
    pub fn primary_keys(&self) -> Option<&[SchemaId]> {
        match &self.variant {
            LabelVariant::Vertex {
                id_strategy,
                primary_keys,
            } if id_strategy.is_primary_key() => Some(primary_keys),
            _ => None,
        }
    }

    pub fn add_index_label(&mut self, id: SchemaId) {
        if !self.index_labels.contains(&id) {
            self.index_labels.push(id);
        }
    }

    pub fn remove_index_label(&mut self, id: SchemaId) -> bool {
        let before = self.index_labels.len();
        self.index_labels.retain(|existing| *existing != id);
        before != self.index_labels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_label_primary_keys() {
        let label = SchemaLabel::vertex(SchemaId::new(1), "person")
            .with_properties([SchemaId::new(10), SchemaId::new(11)])
            .with_primary_keys([SchemaId::new(10)]);

        assert_eq!(label.schema_type(), SchemaType::VertexLabel);
        assert_eq!(label.primary_keys(), Some(&[SchemaId::new(10)][..]));
    }

    #[test]
    fn test_automatic_vertex_label_has_no_primary_keys() {
        let label = SchemaLabel::vertex(SchemaId::new(1), "person");
        assert!(label.primary_keys().is_none());
    }

    #[test]
    fn test_edge_label_ignores_primary_keys() {
        let label = SchemaLabel::edge(SchemaId::new(2), "knows").with_primary_keys([SchemaId::new(3)]);
        assert_eq!(label.schema_type(), SchemaType::EdgeLabel);
        assert!(label.primary_keys().is_none());
    }

    #[test]
    fn test_index_label_links_are_unique_and_ordered() {
        let mut label = SchemaLabel::edge(SchemaId::new(2), "knows");
        label.add_index_label(SchemaId::new(5));
        label.add_index_label(SchemaId::new(4));
        label.add_index_label(SchemaId::new(5));
        assert_eq!(label.index_labels, vec![SchemaId::new(5), SchemaId::new(4)]);

        assert!(label.remove_index_label(SchemaId::new(5)));
        assert!(!label.remove_index_label(SchemaId::new(5)));
        assert_eq!(label.index_labels, vec![SchemaId::new(4)]);
    }
}
