//! 索引数据存储
//!
//! 索引数据的物理构建由底层存储引擎完成，这里只定义重建与删除的入口。

use parking_lot::Mutex;
use std::collections::HashSet;

use crate::core::{IndexLabel, SchemaId, StorageResult};

pub trait IndexDataStore: Send + Sync + std::fmt::Debug {
    /// 清空并重新填充索引数据
    fn rebuild_index(&self, index_label: &IndexLabel) -> StorageResult<()>;

    /// 删除索引的全部数据
    fn remove_index(&self, index_label: &IndexLabel) -> StorageResult<()>;
}

/// 索引数据操作记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexStoreOp {
    Rebuild(String),
    Remove(String),
}

/// 内存索引数据存储，只记录操作与已构建的索引
#[derive(Debug, Default)]
pub struct MemoryIndexDataStore {
    operations: Mutex<Vec<IndexStoreOp>>,
    built: Mutex<HashSet<SchemaId>>,
}

impl MemoryIndexDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按执行顺序返回所有操作
    pub fn operations(&self) -> Vec<IndexStoreOp> {
        self.operations.lock().clone()
    }

    pub fn is_built(&self, id: SchemaId) -> bool {
        self.built.lock().contains(&id)
    }
}

impl IndexDataStore for MemoryIndexDataStore {
    fn rebuild_index(&self, index_label: &IndexLabel) -> StorageResult<()> {
        self.built.lock().insert(index_label.id);
        self.operations
            .lock()
            .push(IndexStoreOp::Rebuild(index_label.name.clone()));
        Ok(())
    }

    fn remove_index(&self, index_label: &IndexLabel) -> StorageResult<()> {
        self.built.lock().remove(&index_label.id);
        self.operations
            .lock()
            .push(IndexStoreOp::Remove(index_label.name.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_records_operations() {
        let store = MemoryIndexDataStore::new();
        let index_label = IndexLabel::new(SchemaId::new(1), "personByName");

        store.rebuild_index(&index_label).expect("rebuild");
        assert!(store.is_built(SchemaId::new(1)));

        store.remove_index(&index_label).expect("remove");
        assert!(!store.is_built(SchemaId::new(1)));
        assert_eq!(
            store.operations(),
            vec![
                IndexStoreOp::Rebuild("personByName".to_string()),
                IndexStoreOp::Remove("personByName".to_string()),
            ]
        );
    }
}
