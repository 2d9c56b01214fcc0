//! Connection and import parameter resolution for database schema importers.
//!
//! Raw input arrives either as schema-keyed form values or as a flat
//! property file. [`params`] resolves it into a [`model::ConnectionConfig`]
//! against a [`dialects::DatabaseDialect`], which then builds URLs and
//! connection handles per database name.

pub mod cli;
pub mod dialects;
pub mod executor;
pub mod logger;
pub mod model;
pub mod orchestrator;
pub mod params;

pub use dialects::{get_dialect, DatabaseDialect};
pub use executor::{ConnectionError, ConnectionHandle};
pub use model::{ConnectionConfig, ImportPolicy};
pub use params::{
    is_multi_database_import, resolve_from_properties, resolve_from_structured_input,
    Properties, StructuredInput, ValidationError,
};
