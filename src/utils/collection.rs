//! 有序列表的包含关系判断，用于索引字段比较

use std::collections::HashSet;
use std::hash::Hash;

/// `prefix` 是否为 `all` 的前缀（逐元素相等）
///
/// 相同的列表互为前缀
pub fn prefix_of<T: PartialEq>(prefix: &[T], all: &[T]) -> bool {
    if prefix.len() > all.len() {
        return false;
    }
    prefix.iter().zip(all.iter()).all(|(a, b)| a == b)
}

/// `all` 是否包含 `part` 的全部元素，不考虑顺序
pub fn contains_all<T: PartialEq>(all: &[T], part: &[T]) -> bool {
    part.iter().all(|item| all.contains(item))
}

/// 列表元素是否互不相同
pub fn all_unique<T: Eq + Hash>(items: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().all(|item| seen.insert(item))
}
