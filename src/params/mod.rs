//! Import parameter declaration and resolution.

pub mod properties;
pub mod resolver;
pub mod schema;

pub use properties::{Properties, PropertiesError};
pub use resolver::{
    is_multi_database_import, resolve_from_properties, resolve_from_structured_input,
    split_database_names, FolderIdGenerator, RandomFolderIds, StructuredInput, ValidationError,
};
pub use schema::{ParameterField, PARAMETER_SCHEMA};
