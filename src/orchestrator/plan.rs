use crate::dialects::DatabaseDialect;
use crate::executor::{ConnectionError, ConnectionHandle};
use crate::model::ConnectionConfig;
use crate::orchestrator::resolve::{resolve_request, ImportError, ImportRequest};
use log::{debug, info, warn};

/// One database to import and the model it becomes.
#[derive(Debug, Clone)]
pub struct ImportTarget {
    pub database_name: String,
    pub model_name: String,
    pub connection: ConnectionHandle,
}

/// Model name for one database of the import.
///
/// A single-database import takes the override when one is supplied.
/// Otherwise the database name is used, with `_{suffix}` appended when a
/// suffix is configured.
pub fn model_name_for(
    config: &ConnectionConfig,
    database_name: &str,
    model_name_override: Option<&str>,
) -> String {
    let model_name_override = model_name_override.filter(|n| !n.trim().is_empty());
    if let Some(name) = model_name_override {
        if !config.is_multi_database_import() {
            return name.to_string();
        }
    }

    match config.name_suffix() {
        Some(suffix) => format!("{}_{}", database_name, suffix),
        None => database_name.to_string(),
    }
}

/// Fan a resolved config out into one target per database name.
///
/// Every target gets its own connection handle, so values the property
/// channel left empty fail here.
pub fn plan_import(
    config: &ConnectionConfig,
    dialect: &dyn DatabaseDialect,
    model_name_override: Option<&str>,
) -> Result<Vec<ImportTarget>, ConnectionError> {
    if config.database_names().is_empty() {
        return Err(ConnectionError::MissingParameter {
            parameter: "database name".to_string(),
            database: String::new(),
        });
    }

    if config.is_multi_database_import() && model_name_override.is_some() {
        warn!(
            "Ignoring model name override for multi-database import of {} databases",
            config.database_names().len()
        );
    }

    let mut targets = Vec::with_capacity(config.database_names().len());
    for database_name in config.database_names() {
        let connection = dialect.open_connection(config, database_name)?;
        let model_name = model_name_for(config, database_name, model_name_override);
        debug!("Planned {} -> {}", database_name, model_name);
        targets.push(ImportTarget {
            database_name: database_name.clone(),
            model_name,
            connection,
        });
    }

    Ok(targets)
}

pub fn run_plan(request: &ImportRequest, model_name_override: Option<&str>) -> Result<(), ImportError> {
    info!("Planning import");
    let (dialect, config) = resolve_request(request)?;
    let targets = plan_import(&config, dialect.as_ref(), model_name_override)?;

    info!("Planned {} import target(s)", targets.len());
    for target in &targets {
        println!(
            "{} -> {} ({})",
            target.database_name,
            target.model_name,
            target.connection.url()
        );
    }

    Ok(())
}
