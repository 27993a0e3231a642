//! Schema 数据模型

pub mod index;
pub mod label;
pub mod property;
pub mod schema_type;

pub use index::{IndexLabel, IndexType, SchemaStatus};
pub use label::{IdStrategy, LabelVariant, SchemaLabel};
pub use property::{Cardinality, DataType, PropertyKey};
pub use schema_type::{GraphMode, SchemaId, SchemaType};
