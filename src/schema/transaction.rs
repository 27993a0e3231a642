//! Schema 事务
//!
//! 将元数据目录、后台任务调度器、索引数据存储与配置组合在一起，
//! 作为所有索引标签操作的显式上下文。

use regex::Regex;
use std::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::core::{
    IndexLabel, PropertyKey, SchemaError, SchemaId, SchemaLabel, SchemaResult, SchemaStatus,
    SchemaType, StorageError,
};
use crate::schema::catalog::SchemaCatalog;
use crate::storage::IndexDataStore;
use crate::task::{IndexTask, TaskHandle, TaskScheduler, TaskType};

/// 名称中不允许出现的字符
const ILLEGAL_NAME_CHARS: [char; 4] = ['#', '>', ':', '!'];

#[derive(Clone)]
pub struct SchemaTransaction {
    catalog: Arc<dyn SchemaCatalog>,
    scheduler: Arc<dyn TaskScheduler>,
    index_store: Arc<dyn IndexDataStore>,
    config: Arc<Config>,
    illegal_name: Regex,
}

impl SchemaTransaction {
    pub fn new(
        catalog: Arc<dyn SchemaCatalog>,
        scheduler: Arc<dyn TaskScheduler>,
        index_store: Arc<dyn IndexDataStore>,
        config: Config,
    ) -> SchemaResult<Self> {
        let pattern = format!("^(?:{})$", config.schema.illegal_name_regex);
        let illegal_name = Regex::new(&pattern).map_err(|e| {
            SchemaError::Definition(format!(
                "非法的名称模式 '{}': {}",
                config.schema.illegal_name_regex, e
            ))
        })?;
        Ok(Self {
            catalog,
            scheduler,
            index_store,
            config: Arc::new(config),
            illegal_name,
        })
    }

    pub fn catalog(&self) -> &Arc<dyn SchemaCatalog> {
        &self.catalog
    }

    pub fn scheduler(&self) -> &Arc<dyn TaskScheduler> {
        &self.scheduler
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 校验 schema 名称
    pub fn check_name(&self, name: &str) -> SchemaResult<()> {
        if name.is_empty() {
            return Err(SchemaError::Definition("名称不能为空".to_string()));
        }
        if name.len() >= self.config.schema.max_name_length {
            return Err(SchemaError::Definition(format!(
                "名称长度必须小于 {} 字节: '{}'",
                self.config.schema.max_name_length, name
            )));
        }
        if self.illegal_name.is_match(name) {
            return Err(SchemaError::Definition(format!("非法的 schema 名称 '{}'", name)));
        }
        if let Some(c) = name.chars().find(|c| ILLEGAL_NAME_CHARS.contains(c)) {
            return Err(SchemaError::Definition(format!(
                "名称 '{}' 不能包含字符 '{}'",
                name, c
            )));
        }
        Ok(())
    }

    /// 恢复模式下必须显式提供 ID
    pub fn check_id_if_restoring_mode(&self, schema_type: SchemaType, id: Option<SchemaId>) -> SchemaResult<()> {
        if self.catalog.graph_mode().is_restoring() && id.is_none() {
            return Err(SchemaError::Definition(format!(
                "恢复模式下创建{}必须指定 ID",
                schema_type
            )));
        }
        Ok(())
    }

    pub fn validate_or_generate_id(
        &self,
        schema_type: SchemaType,
        id: Option<SchemaId>,
        name: &str,
    ) -> SchemaResult<SchemaId> {
        self.catalog
            .validate_or_generate_id(schema_type, id, name)
            .map_err(|e| match e {
                StorageError::AlreadyExists(msg) | StorageError::InvalidInput(msg) => {
                    SchemaError::Definition(msg)
                }
                other => SchemaError::Storage(other),
            })
    }

    pub fn get_property_key(&self, name: &str) -> SchemaResult<PropertyKey> {
        self.catalog
            .get_property_key(name)?
            .ok_or_else(|| SchemaError::NotFound(format!("属性键 '{}'", name)))
    }

    pub fn get_property_key_by_id(&self, id: SchemaId) -> SchemaResult<PropertyKey> {
        self.catalog
            .get_property_key_by_id(id)?
            .ok_or_else(|| SchemaError::NotFound(format!("属性键 ID {}", id)))
    }

    pub fn get_vertex_label(&self, name: &str) -> SchemaResult<SchemaLabel> {
        self.catalog
            .get_vertex_label(name)?
            .ok_or_else(|| SchemaError::NotFound(format!("顶点标签 '{}'", name)))
    }

    pub fn get_edge_label(&self, name: &str) -> SchemaResult<SchemaLabel> {
        self.catalog
            .get_edge_label(name)?
            .ok_or_else(|| SchemaError::NotFound(format!("边标签 '{}'", name)))
    }

    pub fn get_index_label(&self, name: &str) -> SchemaResult<Option<IndexLabel>> {
        Ok(self.catalog.get_index_label(name)?)
    }

    pub fn get_index_label_by_id(&self, id: SchemaId) -> SchemaResult<Option<IndexLabel>> {
        Ok(self.catalog.get_index_label_by_id(id)?)
    }

    /// 所属标签上当前挂载的索引标签，按挂载顺序返回
    pub fn index_labels_of(&self, owner: &SchemaLabel) -> SchemaResult<Vec<IndexLabel>> {
        let mut index_labels = Vec::with_capacity(owner.index_labels.len());
        for id in &owner.index_labels {
            match self.catalog.get_index_label_by_id(*id)? {
                Some(index_label) => index_labels.push(index_label),
                None => log::debug!("{} '{}' 上的索引标签 {} 已不存在", owner.schema_type(), owner.name, id),
            }
        }
        Ok(index_labels)
    }

    /// 按原顺序把属性键 ID 映射为名称
    pub fn map_pk_ids_to_names(&self, ids: &[SchemaId]) -> SchemaResult<Vec<String>> {
        ids.iter()
            .map(|id| self.get_property_key_by_id(*id).map(|pk| pk.name))
            .collect()
    }

    /// 持久化索引标签并挂到所属标签上
    pub fn add_index_label(&self, owner: &mut SchemaLabel, index_label: &IndexLabel) -> SchemaResult<()> {
        self.catalog.add_index_label(index_label)?;
        owner.add_index_label(index_label.id);
        Ok(())
    }

    /// 将索引标签从所属标签上摘除
    pub fn unlink_index_label(&self, owner: &mut SchemaLabel, id: SchemaId) -> SchemaResult<()> {
        owner.remove_index_label(id);
        self.catalog
            .unlink_index_label(owner.schema_type(), owner.id, id)?;
        Ok(())
    }

    /// 从所属标签上摘除索引标签，并异步删除它及其索引数据
    pub fn remove_index_label(&self, id: SchemaId) -> SchemaResult<TaskHandle> {
        let index_label = self
            .get_index_label_by_id(id)?
            .ok_or_else(|| SchemaError::NotFound(format!("索引标签 ID {}", id)))?;
        self.catalog
            .unlink_index_label(index_label.base_type, index_label.base_value, id)?;
        self.catalog
            .update_index_label_status(id, SchemaStatus::Deleting)?;

        let catalog = Arc::clone(&self.catalog);
        let store = Arc::clone(&self.index_store);
        let description = format!("删除索引标签 '{}'", index_label.name);
        let task = IndexTask::new(TaskType::RemoveIndex, description, move || {
            store.remove_index(&index_label)?;
            catalog.delete_index_label(index_label.id)?;
            Ok(())
        });
        self.submit(task)
    }

    /// 异步重建索引，`dependencies` 中的任务结束后才开始
    pub fn rebuild_index(&self, index_label: &IndexLabel, dependencies: &[TaskHandle]) -> SchemaResult<TaskHandle> {
        let id = index_label.id;
        let catalog = Arc::clone(&self.catalog);
        let store = Arc::clone(&self.index_store);
        let description = format!("重建索引标签 '{}'", index_label.name);
        let task = IndexTask::new(TaskType::RebuildIndex, description, move || {
            let Some(current) = catalog.get_index_label_by_id(id)? else {
                log::warn!("索引标签 {} 已被删除，跳过重建", id);
                return Ok(());
            };
            if current.status == SchemaStatus::Deleting {
                log::warn!("索引标签 '{}' 正在删除，跳过重建", current.name);
                return Ok(());
            }
            if current.status == SchemaStatus::Complete {
                catalog.update_index_label_status(id, SchemaStatus::Rebuilding)?;
            }
            match store.rebuild_index(&current) {
                Ok(()) => {
                    catalog.update_index_label_status(id, SchemaStatus::Complete)?;
                    Ok(())
                }
                Err(e) => {
                    catalog.update_index_label_status(id, SchemaStatus::Invalid)?;
                    Err(e)
                }
            }
        })
        .with_dependencies(dependencies.iter().map(TaskHandle::id));
        self.submit(task)
    }

    fn submit(&self, task: IndexTask) -> SchemaResult<TaskHandle> {
        let id = self.scheduler.schedule(task)?;
        Ok(TaskHandle::new(id, Arc::clone(&self.scheduler)))
    }
}

impl fmt::Debug for SchemaTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaTransaction")
            .field("catalog", &self.catalog)
            .field("scheduler", &self.scheduler)
            .field("graph_mode", &self.catalog.graph_mode())
            .finish()
    }
}
