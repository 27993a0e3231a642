//! 集成测试共享工具模块
//!
//! 提供测试基础设施和辅助函数，供所有集成测试使用

#![allow(dead_code)]

pub mod assertions;
pub mod data_fixtures;
pub mod storage_helpers;

use std::sync::Arc;
use std::time::{Duration, Instant};

use graphschema::config::Config;
use graphschema::core::{SchemaStatus, SchemaId};
use graphschema::schema::{MemorySchemaCatalog, SchemaTransaction};
use graphschema::storage::{IndexDataStore, MemoryIndexDataStore};
use graphschema::task::TokioTaskScheduler;

/// 测试用 schema 环境
///
/// 内存目录预先填充 `data_fixtures::populate` 中的属性键与标签
pub struct TestSchema<S: IndexDataStore + 'static = MemoryIndexDataStore> {
    pub catalog: Arc<MemorySchemaCatalog>,
    pub store: Arc<S>,
    pub tx: SchemaTransaction,
}

impl TestSchema<MemoryIndexDataStore> {
    pub fn new() -> Self {
        Self::with_store(MemoryIndexDataStore::new(), Config::default())
    }
}

impl<S: IndexDataStore + 'static> TestSchema<S> {
    pub fn with_store(store: S, config: Config) -> Self {
        let catalog = Arc::new(MemorySchemaCatalog::new());
        data_fixtures::populate(&catalog);

        let store = Arc::new(store);
        let scheduler =
            Arc::new(TokioTaskScheduler::new(&config.task).expect("创建任务调度器失败"));
        let tx = SchemaTransaction::new(catalog.clone(), scheduler, store.clone(), config)
            .expect("创建 schema 事务失败");
        Self { catalog, store, tx }
    }

    /// 轮询直到索引标签进入指定状态或超时
    pub fn wait_for_status(&self, id: SchemaId, status: SchemaStatus, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let current = self
                .tx
                .get_index_label_by_id(id)
                .expect("查询索引标签失败")
                .map(|il| il.status);
            if current == Some(status) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        false
    }
}
