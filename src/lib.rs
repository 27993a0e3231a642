//! GraphSchema - index label metadata management for a property graph database
//!
//! This crate defines secondary, range, search, shard and unique indexes over
//! vertex/edge label properties, rejects redundant definitions, removes indexes
//! made obsolete by a new one, and coordinates index rebuilds on a background
//! task runtime.

pub mod config;
pub mod core;
pub mod schema;
pub mod storage;
pub mod task;
pub mod utils;

pub use crate::config::Config;
pub use crate::core::{SchemaError, SchemaResult};
pub use crate::schema::{IndexLabelBuilder, MemorySchemaCatalog, SchemaCatalog, SchemaTransaction};
