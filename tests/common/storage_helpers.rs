//! 索引数据存储测试替身

use parking_lot::{Condvar, Mutex};

use graphschema::core::{IndexLabel, StorageError, StorageResult};
use graphschema::storage::{IndexDataStore, IndexStoreOp, MemoryIndexDataStore};

/// 重建操作阻塞直到 `open` 被调用；`gating_removal` 构造的实例改为阻塞删除操作
#[derive(Debug, Default)]
pub struct GatedIndexStore {
    inner: MemoryIndexDataStore,
    gate_removal: bool,
    opened: Mutex<bool>,
    signal: Condvar,
}

impl GatedIndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gating_removal() -> Self {
        Self {
            gate_removal: true,
            ..Self::default()
        }
    }

    pub fn open(&self) {
        *self.opened.lock() = true;
        self.signal.notify_all();
    }

    pub fn operations(&self) -> Vec<IndexStoreOp> {
        self.inner.operations()
    }

    fn pass(&self) {
        let mut opened = self.opened.lock();
        while !*opened {
            self.signal.wait(&mut opened);
        }
    }
}

impl IndexDataStore for GatedIndexStore {
    fn rebuild_index(&self, index_label: &IndexLabel) -> StorageResult<()> {
        if !self.gate_removal {
            self.pass();
        }
        self.inner.rebuild_index(index_label)
    }

    fn remove_index(&self, index_label: &IndexLabel) -> StorageResult<()> {
        if self.gate_removal {
            self.pass();
        }
        self.inner.remove_index(index_label)
    }
}

/// 重建总是失败
#[derive(Debug, Default)]
pub struct FailingIndexStore;

impl IndexDataStore for FailingIndexStore {
    fn rebuild_index(&self, index_label: &IndexLabel) -> StorageResult<()> {
        Err(StorageError::IndexError(format!(
            "无法重建索引 '{}'",
            index_label.name
        )))
    }

    fn remove_index(&self, _index_label: &IndexLabel) -> StorageResult<()> {
        Ok(())
    }
}
