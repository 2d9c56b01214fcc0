//! Database dialects for import connections.
//!
//! Each dialect carries its metadata in an embedded `dialect.toml` and
//! implements the [`DatabaseDialect`] trait: default port, dialect id, URL
//! shape and connection handle construction. Callers pick a dialect through
//! the registry; the resolver only ever sees the trait.

pub mod base;
pub mod registry;

pub mod mysql;
pub mod oracle;
pub mod postgres;
pub mod sqlserver;

pub use base::{DatabaseDialect, DialectConfig, DialectError};
pub use registry::get_registry;

use std::sync::Arc;

/// Get dialect by name or alias
pub fn get_dialect(name: &str) -> Result<Arc<dyn DatabaseDialect>, DialectError> {
    get_registry()
        .get(name)
        .ok_or_else(|| DialectError::NotFound(name.to_string()))
}

/// List all available dialect names
pub fn list_dialects() -> Vec<String> {
    get_registry().list_dialects()
}
