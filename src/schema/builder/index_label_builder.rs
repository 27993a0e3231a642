//! 索引标签构建器
//!
//! 链式收集索引定义（所属标签、字段、索引类型、可选 ID），
//! 终结操作在给定的 schema 事务上完成校验、去重、覆盖处理与异步重建。

use crate::core::{IndexLabel, IndexType, PropertyKey, SchemaError, SchemaId, SchemaLabel, SchemaResult, SchemaStatus, SchemaType};
use crate::schema::builder::consistency::check_repeat_index;
use crate::schema::builder::subsumption::remove_sub_index;
use crate::schema::builder::validator::check_fields;
use crate::schema::transaction::SchemaTransaction;
use crate::task::{TaskHandle, TaskStatus};
use crate::utils::collection::all_unique;

/// 异步创建的结果
#[derive(Debug, Clone)]
pub struct CreatedIndexLabel {
    pub index_label: IndexLabel,
    /// 重建任务；索引标签已存在时为 None
    pub task: Option<TaskHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexLabelBuilder {
    id: Option<SchemaId>,
    name: String,
    base_type: Option<SchemaType>,
    base_value: Option<String>,
    index_type: IndexType,
    index_fields: Vec<String>,
    check_exist: bool,
}

impl IndexLabelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            base_type: None,
            base_value: None,
            index_type: IndexType::Secondary,
            index_fields: Vec::new(),
            check_exist: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn requested_type(&self) -> IndexType {
        self.index_type
    }

    /// 显式指定 ID，0 为保留值
    pub fn id(mut self, id: i64) -> SchemaResult<Self> {
        if id == 0 {
            return Err(SchemaError::Definition(format!(
                "索引标签 '{}' 不允许使用 0 作为 ID",
                self.name
            )));
        }
        if id < 0 {
            return Err(SchemaError::Definition(format!(
                "索引标签 '{}' 的 ID 必须为正数, 实际为 {}",
                self.name, id
            )));
        }
        self.id = Some(SchemaId::new(id));
        Ok(self)
    }

    pub fn on_v(mut self, label: impl Into<String>) -> Self {
        self.base_type = Some(SchemaType::VertexLabel);
        self.base_value = Some(label.into());
        self
    }

    pub fn on_e(mut self, label: impl Into<String>) -> Self {
        self.base_type = Some(SchemaType::EdgeLabel);
        self.base_value = Some(label.into());
        self
    }

    /// 指定所属标签，只接受顶点标签或边标签
    pub fn on(self, base_type: SchemaType, label: impl Into<String>) -> SchemaResult<Self> {
        match base_type {
            SchemaType::VertexLabel => Ok(self.on_v(label)),
            SchemaType::EdgeLabel => Ok(self.on_e(label)),
            other => Err(SchemaError::Definition(format!(
                "索引标签 '{}' 的所属类型只能是顶点标签或边标签，实际为{}",
                self.name, other
            ))),
        }
    }

    /// 设置索引字段，只能调用一次
    pub fn by<I, S>(mut self, fields: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            return Err(SchemaError::Definition(format!(
                "索引标签 '{}' 的索引字段不能为空",
                self.name
            )));
        }
        if !self.index_fields.is_empty() {
            return Err(SchemaError::Definition(format!(
                "索引标签 '{}' 不允许多次设置索引字段",
                self.name
            )));
        }
        if !all_unique(&fields) {
            return Err(SchemaError::Definition(format!(
                "非法的索引字段 {:?}，包含重复的属性",
                fields
            )));
        }
        self.index_fields = fields;
        Ok(self)
    }

    pub fn secondary(self) -> Self {
        self.index_type(IndexType::Secondary)
    }

    pub fn range(self) -> Self {
        self.index_type(IndexType::Range)
    }

    pub fn search(self) -> Self {
        self.index_type(IndexType::Search)
    }

    pub fn shard(self) -> Self {
        self.index_type(IndexType::Shard)
    }

    pub fn unique(self) -> Self {
        self.index_type(IndexType::Unique)
    }

    pub fn index_type(mut self, index_type: IndexType) -> Self {
        self.index_type = index_type;
        self
    }

    /// 同名索引标签已存在时返回已有的定义而不报错
    pub fn if_not_exist(self) -> Self {
        self.check_exist(false)
    }

    pub fn check_exist(mut self, check_exist: bool) -> Self {
        self.check_exist = check_exist;
        self
    }

    /// 解析所属标签与字段，生成未持久化的索引标签
    ///
    /// 范围索引请求会按字段类型特化；不做重复检测。
    pub fn build(&self, tx: &SchemaTransaction) -> SchemaResult<IndexLabel> {
        let owner = self.load_element(tx)?;
        let keys = self.load_fields(tx)?;
        let index_type = check_fields(tx, &owner, &keys, self.index_type)?;
        self.materialize(tx, &owner, &keys, index_type)
    }

    /// 创建索引标签并提交重建任务，不等待任务结束
    pub fn create_with_task(&self, tx: &SchemaTransaction) -> SchemaResult<CreatedIndexLabel> {
        tx.check_name(&self.name)?;
        if let Some(existing) = tx.get_index_label(&self.name)? {
            if self.check_exist {
                return Err(SchemaError::Exists {
                    schema_type: SchemaType::IndexLabel,
                    name: self.name.clone(),
                });
            }
            log::debug!("索引标签 '{}' 已存在，直接返回", self.name);
            return Ok(CreatedIndexLabel {
                index_label: existing,
                task: None,
            });
        }
        tx.check_id_if_restoring_mode(SchemaType::IndexLabel, self.id)?;

        let mut owner = self.load_element(tx)?;
        let keys = self.load_fields(tx)?;
        let index_type = check_fields(tx, &owner, &keys, self.index_type)?;
        let existing = tx.index_labels_of(&owner)?;
        check_repeat_index(tx, &owner, &existing, &self.name, index_type, &keys)?;

        let index_label = self.materialize(tx, &owner, &keys, index_type)?;
        let removals = remove_sub_index(tx, &mut owner, &existing, index_type, &index_label.index_fields)?;

        tx.add_index_label(&mut owner, &index_label)?;
        let task = tx.rebuild_index(&index_label, &removals)?;
        log::info!(
            "创建索引标签 '{}'({}) 于{} '{}'，重建任务 {}",
            index_label.name,
            index_label.index_type,
            owner.schema_type(),
            owner.name,
            task.id()
        );

        Ok(CreatedIndexLabel {
            index_label,
            task: Some(task),
        })
    }

    /// 创建索引标签并在配置的超时时间内等待重建完成
    ///
    /// 超时返回 `SchemaError::Timeout`，后台任务继续执行，索引保持 CREATING 状态。
    pub fn create(&self, tx: &SchemaTransaction) -> SchemaResult<IndexLabel> {
        let CreatedIndexLabel { index_label, task } = self.create_with_task(tx)?;
        let Some(task) = task else {
            return Ok(index_label);
        };

        let timeout = tx.config().task.wait_timeout();
        let info = task.wait(timeout).map_err(|e| {
            log::warn!("等待索引标签 '{}' 的重建任务 {} 失败: {}", index_label.name, task.id(), e);
            SchemaError::from(e)
        })?;
        if let TaskStatus::Failed(reason) = &info.status {
            log::warn!("索引标签 '{}' 重建失败: {}", index_label.name, reason);
        }
        if let Err(e) = task.delete() {
            log::debug!("清理重建任务 {} 失败: {}", task.id(), e);
        }

        Ok(tx.get_index_label_by_id(index_label.id)?.unwrap_or(index_label))
    }

    /// 索引定义不可追加
    pub fn append(&self) -> SchemaResult<IndexLabel> {
        Err(SchemaError::UnsupportedOperation(format!(
            "索引标签 '{}' 不支持 append",
            self.name
        )))
    }

    /// 索引定义不可裁剪
    pub fn eliminate(&self) -> SchemaResult<IndexLabel> {
        Err(SchemaError::UnsupportedOperation(format!(
            "索引标签 '{}' 不支持 eliminate",
            self.name
        )))
    }

    /// 删除同名索引标签；不存在时返回 None
    pub fn remove(&self, tx: &SchemaTransaction) -> SchemaResult<Option<TaskHandle>> {
        let Some(index_label) = tx.get_index_label(&self.name)? else {
            log::debug!("索引标签 '{}' 不存在，无需删除", self.name);
            return Ok(None);
        };
        let task = tx.remove_index_label(index_label.id)?;
        log::info!("删除索引标签 '{}'，任务 {}", index_label.name, task.id());
        Ok(Some(task))
    }

    /// 重建同名索引标签的索引数据；不存在或正在删除时返回 None
    pub fn rebuild(&self, tx: &SchemaTransaction) -> SchemaResult<Option<TaskHandle>> {
        let Some(index_label) = tx.get_index_label(&self.name)? else {
            log::debug!("索引标签 '{}' 不存在，无需重建", self.name);
            return Ok(None);
        };
        if index_label.status == SchemaStatus::Deleting {
            log::debug!("索引标签 '{}' 正在删除，无需重建", self.name);
            return Ok(None);
        }
        let task = tx.rebuild_index(&index_label, &[])?;
        log::info!("重建索引标签 '{}'，任务 {}", index_label.name, task.id());
        Ok(Some(task))
    }

    fn load_element(&self, tx: &SchemaTransaction) -> SchemaResult<SchemaLabel> {
        let (Some(base_type), Some(base_value)) = (self.base_type, self.base_value.as_deref()) else {
            return Err(SchemaError::Definition(format!(
                "索引标签 '{}' 缺少所属标签",
                self.name
            )));
        };
        match base_type {
            SchemaType::VertexLabel => tx.get_vertex_label(base_value),
            SchemaType::EdgeLabel => tx.get_edge_label(base_value),
            other => Err(SchemaError::Definition(format!(
                "索引标签 '{}' 不支持的所属类型{}",
                self.name, other
            ))),
        }
    }

    fn load_fields(&self, tx: &SchemaTransaction) -> SchemaResult<Vec<PropertyKey>> {
        if self.index_fields.is_empty() {
            return Err(SchemaError::Definition(format!(
                "索引标签 '{}' 缺少索引字段",
                self.name
            )));
        }
        self.index_fields
            .iter()
            .map(|field| tx.get_property_key(field))
            .collect()
    }

    fn materialize(
        &self,
        tx: &SchemaTransaction,
        owner: &SchemaLabel,
        keys: &[PropertyKey],
        index_type: IndexType,
    ) -> SchemaResult<IndexLabel> {
        let id = tx.validate_or_generate_id(SchemaType::IndexLabel, self.id, &self.name)?;
        let mut index_label = IndexLabel::new(id, self.name.clone())
            .on(owner.schema_type(), owner.id)
            .with_index_type(index_type)
            .with_status(SchemaStatus::Creating);
        for key in keys {
            index_label.add_index_field(key.id);
        }
        Ok(index_label)
    }
}
