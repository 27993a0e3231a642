//! 被新索引覆盖的旧索引处理

use crate::core::{IndexLabel, IndexType, SchemaId, SchemaLabel, SchemaResult};
use crate::schema::builder::validator::all_string_field_ids;
use crate::schema::transaction::SchemaTransaction;
use crate::task::TaskHandle;
use crate::utils::collection::{contains_all, prefix_of};

/// 已有索引的类型是否可能被新索引覆盖
pub fn has_sub_index(tx: &SchemaTransaction, new_type: IndexType, old: &IndexLabel) -> SchemaResult<bool> {
    let old_type = old.index_type;
    if new_type == old_type {
        return Ok(true);
    }
    if new_type.is_shard() && old_type.is_secondary() {
        return Ok(true);
    }
    if new_type.is_secondary() && old_type.is_shard() {
        return all_string_field_ids(tx, &old.index_fields);
    }
    Ok(new_type.is_range() && (old_type.is_secondary() || old_type.is_shard()))
}

/// 被覆盖的已有索引
///
/// 新索引为唯一索引时，已有字段包含全部新字段即被覆盖；
/// 其他类型要求已有字段是新字段的前缀。
pub fn sub_index_labels<'a>(
    tx: &SchemaTransaction,
    existing: &'a [IndexLabel],
    new_type: IndexType,
    new_fields: &[SchemaId],
) -> SchemaResult<Vec<&'a IndexLabel>> {
    let mut subsumed = Vec::new();
    for old in existing {
        if !has_sub_index(tx, new_type, old)? {
            continue;
        }
        let covered = if new_type.is_unique() {
            contains_all(&old.index_fields, new_fields)
        } else {
            prefix_of(&old.index_fields, new_fields)
        };
        if covered {
            subsumed.push(old);
        }
    }
    Ok(subsumed)
}

/// 摘除并异步删除被覆盖的已有索引，返回删除任务句柄
pub fn remove_sub_index(
    tx: &SchemaTransaction,
    owner: &mut SchemaLabel,
    existing: &[IndexLabel],
    new_type: IndexType,
    new_fields: &[SchemaId],
) -> SchemaResult<Vec<TaskHandle>> {
    let subsumed = sub_index_labels(tx, existing, new_type, new_fields)?;
    let mut tasks = Vec::with_capacity(subsumed.len());
    for old in subsumed {
        tx.unlink_index_label(owner, old.id)?;
        let task = tx.remove_index_label(old.id)?;
        log::info!(
            "索引标签 '{}'({}) 被新的 {} 索引覆盖，提交删除任务 {}",
            old.name,
            old.index_type,
            new_type,
            task.id()
        );
        tasks.push(task);
    }
    Ok(tasks)
}
