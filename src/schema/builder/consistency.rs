//! 重复索引检测
//!
//! 新索引与所属标签上已有索引逐一比较：只与特定类型的已有索引比较，
//! 唯一索引按集合包含判断，其他类型按前缀判断。

use crate::core::{IndexLabel, IndexType, PropertyKey, SchemaError, SchemaId, SchemaLabel, SchemaResult};
use crate::schema::builder::validator::{all_string_fields, field_names, one_numeric_field};
use crate::schema::transaction::SchemaTransaction;
use crate::utils::collection::{contains_all, prefix_of};

const RANGE_AND_SHARD: [IndexType; 5] = [
    IndexType::RangeInt,
    IndexType::RangeFloat,
    IndexType::RangeLong,
    IndexType::RangeDouble,
    IndexType::Shard,
];

const RANGE_SECONDARY_AND_SHARD: [IndexType; 6] = [
    IndexType::RangeInt,
    IndexType::RangeFloat,
    IndexType::RangeLong,
    IndexType::RangeDouble,
    IndexType::Secondary,
    IndexType::Shard,
];

/// 字段列表的包含判断方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Containment {
    /// 新字段列表是已有字段列表的前缀
    Prefix,
    /// 任一字段集合包含另一个
    Set,
}

impl Containment {
    fn repeated(self, new_fields: &[SchemaId], old_fields: &[SchemaId]) -> bool {
        match self {
            Containment::Prefix => prefix_of(new_fields, old_fields),
            Containment::Set => {
                contains_all(new_fields, old_fields) || contains_all(old_fields, new_fields)
            }
        }
    }
}

/// 需要与新索引比较的已有索引类型
fn checked_types(index_type: IndexType, keys: &[PropertyKey]) -> &'static [IndexType] {
    match index_type {
        IndexType::Secondary => &RANGE_SECONDARY_AND_SHARD,
        IndexType::Search => &[IndexType::Search],
        IndexType::Unique => &[IndexType::Unique],
        IndexType::Shard if one_numeric_field(keys) => &RANGE_AND_SHARD,
        IndexType::Shard if all_string_fields(keys) => &[IndexType::Secondary, IndexType::Shard],
        IndexType::Shard => &[IndexType::Shard],
        _ => &IndexType::RANGE_TYPES,
    }
}

/// 检查新索引是否与已有索引重复
///
/// `index_type` 必须是已特化的类型。
pub fn check_repeat_index(
    tx: &SchemaTransaction,
    owner: &SchemaLabel,
    existing: &[IndexLabel],
    name: &str,
    index_type: IndexType,
    keys: &[PropertyKey],
) -> SchemaResult<()> {
    check_primary_key_index(tx, owner, index_type, keys)?;

    let containment = if index_type.is_unique() {
        Containment::Set
    } else {
        Containment::Prefix
    };
    let types = checked_types(index_type, keys);
    let new_fields: Vec<SchemaId> = keys.iter().map(|k| k.id).collect();

    for old in existing {
        if !types.contains(&old.index_type) {
            continue;
        }
        if containment.repeated(&new_fields, &old.index_fields) {
            let old_fields = tx.map_pk_ids_to_names(&old.index_fields)?;
            return Err(SchemaError::Redundancy(format!(
                "新索引标签 {}({}) 的字段 {:?} 与已有索引标签 {}({}) 的字段 {:?} 重复",
                name,
                index_type,
                field_names(keys),
                old.name,
                old.index_type,
                old_fields
            )));
        }
    }
    Ok(())
}

/// 主键策略的顶点标签上，包含全部主键的二级/唯一/字符串分片索引没有意义
fn check_primary_key_index(
    tx: &SchemaTransaction,
    owner: &SchemaLabel,
    index_type: IndexType,
    keys: &[PropertyKey],
) -> SchemaResult<()> {
    let Some(primary_keys) = owner.primary_keys() else {
        return Ok(());
    };
    if primary_keys.is_empty() {
        return Ok(());
    }
    let affected = index_type.is_secondary()
        || index_type.is_unique()
        || (index_type.is_shard() && all_string_fields(keys));
    if !affected {
        return Ok(());
    }

    let new_fields: Vec<SchemaId> = keys.iter().map(|k| k.id).collect();
    if contains_all(&new_fields, primary_keys) {
        let pk_names = tx.map_pk_ids_to_names(primary_keys)?;
        return Err(SchemaError::Redundancy(format!(
            "无需在属性 {:?} 上建立索引，它们包含了顶点标签 '{}' 的全部主键 {:?}",
            field_names(keys),
            owner.name,
            pk_names
        )));
    }
    Ok(())
}
