//! Schema 元数据目录
//!
//! 保存属性键、顶点/边标签与索引标签，并负责 schema ID 的分配。

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::core::{
    Cardinality, DataType, GraphMode, IndexLabel, PropertyKey, SchemaId, SchemaLabel,
    SchemaStatus, SchemaType, StorageError, StorageResult,
};

pub trait SchemaCatalog: Send + Sync + std::fmt::Debug {
    fn graph_mode(&self) -> GraphMode;

    /// 校验显式指定的 ID，或为新元素分配 ID
    fn validate_or_generate_id(
        &self,
        schema_type: SchemaType,
        id: Option<SchemaId>,
        name: &str,
    ) -> StorageResult<SchemaId>;

    fn get_property_key(&self, name: &str) -> StorageResult<Option<PropertyKey>>;
    fn get_property_key_by_id(&self, id: SchemaId) -> StorageResult<Option<PropertyKey>>;

    fn get_vertex_label(&self, name: &str) -> StorageResult<Option<SchemaLabel>>;
    fn get_edge_label(&self, name: &str) -> StorageResult<Option<SchemaLabel>>;
    fn get_label_by_id(&self, schema_type: SchemaType, id: SchemaId) -> StorageResult<Option<SchemaLabel>>;

    fn get_index_label(&self, name: &str) -> StorageResult<Option<IndexLabel>>;
    fn get_index_label_by_id(&self, id: SchemaId) -> StorageResult<Option<IndexLabel>>;
    fn list_index_labels(&self) -> StorageResult<Vec<IndexLabel>>;

    /// 持久化索引标签并挂到所属标签上
    fn add_index_label(&self, index_label: &IndexLabel) -> StorageResult<()>;
    /// 将索引标签从所属标签上摘除，索引标签本身保留
    fn unlink_index_label(&self, base_type: SchemaType, base_value: SchemaId, id: SchemaId) -> StorageResult<bool>;
    fn update_index_label_status(&self, id: SchemaId, status: SchemaStatus) -> StorageResult<bool>;
    /// 删除索引标签，同时从所属标签上摘除
    fn delete_index_label(&self, id: SchemaId) -> StorageResult<Option<IndexLabel>>;
}

#[derive(Debug, Default)]
struct CatalogState {
    property_keys: HashMap<SchemaId, PropertyKey>,
    vertex_labels: HashMap<SchemaId, SchemaLabel>,
    edge_labels: HashMap<SchemaId, SchemaLabel>,
    index_labels: HashMap<SchemaId, IndexLabel>,
    next_ids: HashMap<SchemaType, i64>,
}

impl CatalogState {
    fn name_of(&self, schema_type: SchemaType, id: SchemaId) -> Option<&str> {
        match schema_type {
            SchemaType::PropertyKey => self.property_keys.get(&id).map(|pk| pk.name.as_str()),
            SchemaType::VertexLabel => self.vertex_labels.get(&id).map(|l| l.name.as_str()),
            SchemaType::EdgeLabel => self.edge_labels.get(&id).map(|l| l.name.as_str()),
            SchemaType::IndexLabel => self.index_labels.get(&id).map(|il| il.name.as_str()),
        }
    }

    fn labels_mut(&mut self, schema_type: SchemaType) -> StorageResult<&mut HashMap<SchemaId, SchemaLabel>> {
        match schema_type {
            SchemaType::VertexLabel => Ok(&mut self.vertex_labels),
            SchemaType::EdgeLabel => Ok(&mut self.edge_labels),
            other => Err(StorageError::InvalidInput(format!("{} 不是标签类型", other))),
        }
    }

    fn next_id(&mut self, schema_type: SchemaType) -> StorageResult<SchemaId> {
        let next = self.next_ids.entry(schema_type).or_insert(1);
        let id = *next;
        *next = id
            .checked_add(1)
            .ok_or_else(|| StorageError::InvalidInput(format!("{} 的 ID 已耗尽", schema_type)))?;
        Ok(SchemaId::new(id))
    }

    fn property_id(&self, name: &str) -> StorageResult<SchemaId> {
        self.property_keys
            .values()
            .find(|pk| pk.name == name)
            .map(|pk| pk.id)
            .ok_or_else(|| StorageError::NotFound(format!("属性键 '{}'", name)))
    }
}

/// 基于内存的 schema 目录
#[derive(Debug, Default)]
pub struct MemorySchemaCatalog {
    state: RwLock<CatalogState>,
    mode: RwLock<GraphMode>,
}

impl MemorySchemaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_graph_mode(&self, mode: GraphMode) {
        *self.mode.write() = mode;
    }

    pub fn create_property_key(
        &self,
        name: &str,
        data_type: DataType,
        cardinality: Cardinality,
    ) -> StorageResult<PropertyKey> {
        let mut state = self.state.write();
        if state.property_keys.values().any(|pk| pk.name == name) {
            return Err(StorageError::AlreadyExists(format!("属性键 '{}'", name)));
        }
        let id = state.next_id(SchemaType::PropertyKey)?;
        let key = PropertyKey::new(id, name, data_type).with_cardinality(cardinality);
        state.property_keys.insert(id, key.clone());
        Ok(key)
    }

    /// 创建顶点标签；`primary_keys` 非空时使用主键 ID 策略
    pub fn create_vertex_label(
        &self,
        name: &str,
        properties: &[&str],
        primary_keys: &[&str],
    ) -> StorageResult<SchemaLabel> {
        let mut state = self.state.write();
        if state.vertex_labels.values().any(|l| l.name == name) {
            return Err(StorageError::AlreadyExists(format!("顶点标签 '{}'", name)));
        }
        let property_ids = properties
            .iter()
            .map(|p| state.property_id(p))
            .collect::<StorageResult<Vec<_>>>()?;
        let pk_ids = primary_keys
            .iter()
            .map(|p| state.property_id(p))
            .collect::<StorageResult<Vec<_>>>()?;

        let id = state.next_id(SchemaType::VertexLabel)?;
        let mut label = SchemaLabel::vertex(id, name).with_properties(property_ids);
        if !pk_ids.is_empty() {
            label = label.with_primary_keys(pk_ids);
        }
        state.vertex_labels.insert(id, label.clone());
        Ok(label)
    }

    pub fn create_edge_label(&self, name: &str, properties: &[&str]) -> StorageResult<SchemaLabel> {
        let mut state = self.state.write();
        if state.edge_labels.values().any(|l| l.name == name) {
            return Err(StorageError::AlreadyExists(format!("边标签 '{}'", name)));
        }
        let property_ids = properties
            .iter()
            .map(|p| state.property_id(p))
            .collect::<StorageResult<Vec<_>>>()?;

        let id = state.next_id(SchemaType::EdgeLabel)?;
        let label = SchemaLabel::edge(id, name).with_properties(property_ids);
        state.edge_labels.insert(id, label.clone());
        Ok(label)
    }
}

impl SchemaCatalog for MemorySchemaCatalog {
    fn graph_mode(&self) -> GraphMode {
        *self.mode.read()
    }

    fn validate_or_generate_id(
        &self,
        schema_type: SchemaType,
        id: Option<SchemaId>,
        name: &str,
    ) -> StorageResult<SchemaId> {
        let mut state = self.state.write();
        let Some(id) = id else {
            return state.next_id(schema_type);
        };

        if id.as_i64() <= 0 {
            return Err(StorageError::InvalidInput(format!(
                "{} '{}' 的 ID 必须为正数, 实际为 {}",
                schema_type, name, id
            )));
        }
        if let Some(existing) = state.name_of(schema_type, id) {
            if existing != name {
                return Err(StorageError::AlreadyExists(format!(
                    "{} ID {} 已被 '{}' 使用",
                    schema_type, id, existing
                )));
            }
        }
        let following = id.as_i64().checked_add(1).ok_or_else(|| {
            StorageError::InvalidInput(format!(
                "{} '{}' 的 ID {} 超出可分配范围",
                schema_type, name, id
            ))
        })?;
        let next = state.next_ids.entry(schema_type).or_insert(1);
        if *next < following {
            *next = following;
        }
        Ok(id)
    }

    fn get_property_key(&self, name: &str) -> StorageResult<Option<PropertyKey>> {
        let state = self.state.read();
        Ok(state.property_keys.values().find(|pk| pk.name == name).cloned())
    }

    fn get_property_key_by_id(&self, id: SchemaId) -> StorageResult<Option<PropertyKey>> {
        Ok(self.state.read().property_keys.get(&id).cloned())
    }

    fn get_vertex_label(&self, name: &str) -> StorageResult<Option<SchemaLabel>> {
        let state = self.state.read();
        Ok(state.vertex_labels.values().find(|l| l.name == name).cloned())
    }

    fn get_edge_label(&self, name: &str) -> StorageResult<Option<SchemaLabel>> {
        let state = self.state.read();
        Ok(state.edge_labels.values().find(|l| l.name == name).cloned())
    }

    fn get_label_by_id(&self, schema_type: SchemaType, id: SchemaId) -> StorageResult<Option<SchemaLabel>> {
        let state = self.state.read();
        match schema_type {
            SchemaType::VertexLabel => Ok(state.vertex_labels.get(&id).cloned()),
            SchemaType::EdgeLabel => Ok(state.edge_labels.get(&id).cloned()),
            other => Err(StorageError::InvalidInput(format!("{} 不是标签类型", other))),
        }
    }

    fn get_index_label(&self, name: &str) -> StorageResult<Option<IndexLabel>> {
        let state = self.state.read();
        Ok(state.index_labels.values().find(|il| il.name == name).cloned())
    }

    fn get_index_label_by_id(&self, id: SchemaId) -> StorageResult<Option<IndexLabel>> {
        Ok(self.state.read().index_labels.get(&id).cloned())
    }

    fn list_index_labels(&self) -> StorageResult<Vec<IndexLabel>> {
        let state = self.state.read();
        let mut labels: Vec<IndexLabel> = state.index_labels.values().cloned().collect();
        labels.sort_by_key(|il| il.id);
        Ok(labels)
    }

    fn add_index_label(&self, index_label: &IndexLabel) -> StorageResult<()> {
        let mut state = self.state.write();
        if state.index_labels.contains_key(&index_label.id) {
            return Err(StorageError::AlreadyExists(format!(
                "索引标签 ID {}",
                index_label.id
            )));
        }
        let owner = state
            .labels_mut(index_label.base_type)?
            .get_mut(&index_label.base_value)
            .ok_or_else(|| {
                StorageError::NotFound(format!(
                    "{} ID {}",
                    index_label.base_type, index_label.base_value
                ))
            })?;
        owner.add_index_label(index_label.id);
        state.index_labels.insert(index_label.id, index_label.clone());
        Ok(())
    }

    fn unlink_index_label(&self, base_type: SchemaType, base_value: SchemaId, id: SchemaId) -> StorageResult<bool> {
        let mut state = self.state.write();
        Ok(state
            .labels_mut(base_type)?
            .get_mut(&base_value)
            .map(|owner| owner.remove_index_label(id))
            .unwrap_or(false))
    }

    fn update_index_label_status(&self, id: SchemaId, status: SchemaStatus) -> StorageResult<bool> {
        let mut state = self.state.write();
        match state.index_labels.get_mut(&id) {
            Some(index_label) => {
                index_label.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_index_label(&self, id: SchemaId) -> StorageResult<Option<IndexLabel>> {
        let mut state = self.state.write();
        let Some(removed) = state.index_labels.remove(&id) else {
            return Ok(None);
        };
        if let Some(owner) = state.labels_mut(removed.base_type)?.get_mut(&removed.base_value) {
            owner.remove_index_label(id);
        }
        Ok(Some(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::IndexType;

    fn catalog_with_person() -> MemorySchemaCatalog {
        let catalog = MemorySchemaCatalog::new();
        catalog
            .create_property_key("name", DataType::Text, Cardinality::Single)
            .expect("create property key");
        catalog
            .create_property_key("age", DataType::Int, Cardinality::Single)
            .expect("create property key");
        catalog
            .create_vertex_label("person", &["name", "age"], &["name"])
            .expect("create vertex label");
        catalog
    }

    #[test]
    fn test_create_vertex_label_resolves_properties() {
        let catalog = catalog_with_person();
        let person = catalog
            .get_vertex_label("person")
            .expect("lookup")
            .expect("person should exist");
        assert_eq!(person.properties.len(), 2);
        assert_eq!(person.primary_keys().map(|pks| pks.len()), Some(1));
    }

    #[test]
    fn test_create_label_with_unknown_property_fails() {
        let catalog = catalog_with_person();
        let result = catalog.create_edge_label("knows", &["weight"]);
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_generated_ids_skip_explicit_ids() {
        let catalog = MemorySchemaCatalog::new();
        let explicit = catalog
            .validate_or_generate_id(SchemaType::IndexLabel, Some(SchemaId::new(5)), "a")
            .expect("explicit id");
        assert_eq!(explicit, SchemaId::new(5));

        let generated = catalog
            .validate_or_generate_id(SchemaType::IndexLabel, None, "b")
            .expect("generated id");
        assert_eq!(generated, SchemaId::new(6));
    }

    #[test]
    fn test_explicit_id_must_be_positive() {
        let catalog = MemorySchemaCatalog::new();
        let result = catalog.validate_or_generate_id(SchemaType::IndexLabel, Some(SchemaId::new(-3)), "a");
        assert!(matches!(result, Err(StorageError::InvalidInput(_))));
    }

    #[test]
    fn test_explicit_id_at_upper_bound_is_rejected() {
        let catalog = MemorySchemaCatalog::new();
        let result = catalog.validate_or_generate_id(SchemaType::IndexLabel, Some(SchemaId::new(i64::MAX)), "a");
        assert!(matches!(result, Err(StorageError::InvalidInput(_))));

        let max_usable = SchemaId::new(i64::MAX - 1);
        assert_eq!(
            catalog.validate_or_generate_id(SchemaType::IndexLabel, Some(max_usable), "b"),
            Ok(max_usable)
        );
        let generated = catalog.validate_or_generate_id(SchemaType::IndexLabel, None, "c");
        assert!(matches!(generated, Err(StorageError::InvalidInput(_))));
    }

    #[test]
    fn test_add_and_delete_index_label_maintains_owner_links() {
        let catalog = catalog_with_person();
        let person = catalog
            .get_vertex_label("person")
            .expect("lookup")
            .expect("person should exist");

        let index_label = IndexLabel::new(SchemaId::new(1), "personByAge")
            .on(SchemaType::VertexLabel, person.id)
            .with_index_type(IndexType::RangeInt);
        catalog.add_index_label(&index_label).expect("add index label");

        let person = catalog
            .get_label_by_id(SchemaType::VertexLabel, person.id)
            .expect("lookup")
            .expect("person should exist");
        assert_eq!(person.index_labels, vec![SchemaId::new(1)]);

        let removed = catalog.delete_index_label(SchemaId::new(1)).expect("delete");
        assert_eq!(removed.map(|il| il.name), Some("personByAge".to_string()));

        let person = catalog
            .get_label_by_id(SchemaType::VertexLabel, person.id)
            .expect("lookup")
            .expect("person should exist");
        assert!(person.index_labels.is_empty());
        assert_eq!(catalog.delete_index_label(SchemaId::new(1)).expect("delete"), None);
    }

    #[test]
    fn test_explicit_id_conflict() {
        let catalog = catalog_with_person();
        let person = catalog
            .get_vertex_label("person")
            .expect("lookup")
            .expect("person should exist");
        let index_label = IndexLabel::new(SchemaId::new(2), "first").on(SchemaType::VertexLabel, person.id);
        catalog.add_index_label(&index_label).expect("add index label");

        let result = catalog.validate_or_generate_id(SchemaType::IndexLabel, Some(SchemaId::new(2)), "second");
        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));
    }
}
