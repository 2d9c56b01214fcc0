use crate::dialects::{self, DatabaseDialect, DialectError};
use crate::executor::ConnectionError;
use crate::model::ConnectionConfig;
use crate::params::{
    resolve_from_properties, resolve_from_structured_input, Properties, PropertiesError,
    RandomFolderIds, StructuredInput, ValidationError,
};
use log::{debug, info};
use std::sync::Arc;

/// Where the parameters for one import come from.
#[derive(Debug, Clone)]
pub enum ImportInput {
    /// Flat `.properties` file, resolved permissively
    PropertiesFile(String),
    /// Schema-keyed form values, resolved strictly
    Fields(Vec<(String, String)>),
}

#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub dialect: String,
    pub input: ImportInput,
}

/// Resolve a request into its dialect and connection config.
pub fn resolve_request(
    request: &ImportRequest,
) -> Result<(Arc<dyn DatabaseDialect>, ConnectionConfig), ImportError> {
    let dialect = dialects::get_dialect(&request.dialect)?;
    debug!("Using dialect {} ({})", dialect.name(), dialect.dialect_id());

    let config = match &request.input {
        ImportInput::PropertiesFile(path) => {
            info!("Resolving import parameters from {}", path);
            let properties = Properties::load(path)?;
            resolve_from_properties(&properties, dialect.as_ref(), &RandomFolderIds)
        }
        ImportInput::Fields(values) => {
            info!("Resolving {} import parameter values", values.len());
            let input = StructuredInput::from_field_values(values.iter().map(|(k, v)| (k, v.clone())))?;
            resolve_from_structured_input(&input, dialect.as_ref())?
        }
    };

    Ok((dialect, config))
}

pub fn run_resolve(request: &ImportRequest) -> Result<(), ImportError> {
    let (_, config) = resolve_request(request)?;

    println!("{}", config);
    println!("multi-database import: {}", config.is_multi_database_import());
    let policy = config.policy();
    println!(
        "finalised: {} new documentation version: {}",
        policy.finalised, policy.import_as_new_documentation_version
    );
    if let Some(folder_id) = policy.folder_id {
        println!("folder: {}", folder_id);
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Dialect(#[from] DialectError),

    #[error(transparent)]
    Properties(#[from] PropertiesError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error("Use either a properties file or field values, not both")]
    ConflictingInput,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn test_resolve_request_from_properties_file() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(
            temp_file.path(),
            "import.database.host=db1\nimport.database.names=a,b\nimport.database.port=nope\n",
        )
        .unwrap();

        let request = ImportRequest {
            dialect: "mysql".to_string(),
            input: ImportInput::PropertiesFile(temp_file.path().to_string_lossy().to_string()),
        };
        let (dialect, config) = resolve_request(&request).unwrap();

        assert_eq!(dialect.name(), "mysql");
        assert_eq!(config.port(), 3306);
        assert!(config.is_multi_database_import());
        assert!(config.policy().finalised);
    }

    #[test]
    fn test_resolve_request_from_fields_is_strict() {
        let request = ImportRequest {
            dialect: "postgres".to_string(),
            input: ImportInput::Fields(vec![("database_host".to_string(), "db1".to_string())]),
        };
        assert!(matches!(
            resolve_request(&request),
            Err(ImportError::Validation(ValidationError::MissingField { key: "database_username" }))
        ));
    }

    #[test]
    fn test_resolve_request_unknown_dialect() {
        let request = ImportRequest {
            dialect: "sqlite".to_string(),
            input: ImportInput::Fields(Vec::new()),
        };
        assert!(matches!(
            resolve_request(&request),
            Err(ImportError::Dialect(DialectError::NotFound(_)))
        ));
    }
}
