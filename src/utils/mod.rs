// 工具模块 - 仅用于导出各个子模块，不包含具体实现

// 有序列表包含关系
pub mod collection;
pub use collection::{all_unique, contains_all, prefix_of};

// 日志模块
pub mod logging;
