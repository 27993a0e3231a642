//! 索引字段与类型校验

use crate::core::{
    Cardinality, DataType, IndexType, PropertyKey, SchemaError, SchemaId, SchemaLabel, SchemaResult,
};
use crate::schema::transaction::SchemaTransaction;
use crate::utils::collection::contains_all;

/// 校验索引字段，返回特化后的索引类型
///
/// 字段必须属于所属标签且基数为 SINGLE；范围索引只能建在单个数值或日期字段上，
/// 全文索引只能建在单个文本字段上。
pub fn check_fields(
    tx: &SchemaTransaction,
    owner: &SchemaLabel,
    keys: &[PropertyKey],
    index_type: IndexType,
) -> SchemaResult<IndexType> {
    if keys.is_empty() {
        return Err(SchemaError::Definition("索引字段不能为空".to_string()));
    }

    for key in keys {
        if key.cardinality != Cardinality::Single {
            return Err(SchemaError::Definition(format!(
                "不允许在基数为 list 或 set 的属性键 '{}' 上建立索引",
                key.name
            )));
        }
    }

    let field_ids: Vec<SchemaId> = keys.iter().map(|k| k.id).collect();
    if !contains_all(&owner.properties, &field_ids) {
        let properties = tx.map_pk_ids_to_names(&owner.properties)?;
        return Err(SchemaError::Definition(format!(
            "索引字段 {:?} 并不都属于{} '{}' 的属性 {:?}",
            field_names(keys),
            owner.schema_type(),
            owner.name,
            properties
        )));
    }

    if index_type.is_range() {
        let key = single_field(keys, "范围")?;
        return specialize_range(key.data_type, &key.name);
    }

    if index_type.is_search() {
        let key = single_field(keys, "全文")?;
        if !key.data_type.is_text() {
            return Err(SchemaError::Definition(format!(
                "全文索引只能建在文本属性上，实际为 {}({})",
                key.data_type, key.name
            )));
        }
    }

    Ok(index_type)
}

/// 按数据类型确定具体的范围索引类型
pub fn specialize_range(data_type: DataType, field: &str) -> SchemaResult<IndexType> {
    match data_type {
        DataType::Byte | DataType::Int => Ok(IndexType::RangeInt),
        DataType::Float => Ok(IndexType::RangeFloat),
        DataType::Long | DataType::Date => Ok(IndexType::RangeLong),
        DataType::Double => Ok(IndexType::RangeDouble),
        other => Err(SchemaError::Definition(format!(
            "范围索引只能建在数值或日期属性上，实际为 {}({})",
            other, field
        ))),
    }
}

/// 所有字段都不是数值或日期类型
pub fn all_string_fields(keys: &[PropertyKey]) -> bool {
    keys.iter().all(|k| !k.data_type.is_numeric_or_date())
}

/// 按属性键 ID 判断，用于已有索引的字段
pub fn all_string_field_ids(tx: &SchemaTransaction, ids: &[SchemaId]) -> SchemaResult<bool> {
    for id in ids {
        if tx.get_property_key_by_id(*id)?.data_type.is_numeric_or_date() {
            return Ok(false);
        }
    }
    Ok(true)
}

/// 恰好一个字段且为数值或日期类型
pub fn one_numeric_field(keys: &[PropertyKey]) -> bool {
    matches!(keys, [key] if key.data_type.is_numeric_or_date())
}

pub fn field_names(keys: &[PropertyKey]) -> Vec<&str> {
    keys.iter().map(|k| k.name.as_str()).collect()
}

fn single_field<'a>(keys: &'a [PropertyKey], kind: &str) -> SchemaResult<&'a PropertyKey> {
    match keys {
        [key] => Ok(key),
        _ => Err(SchemaError::Definition(format!(
            "{}索引只能建在一个字段上，实际为 {} 个字段: {:?}",
            kind,
            keys.len(),
            field_names(keys)
        ))),
    }
}
