use crate::executor::{ConnectionError, ConnectionHandle};
use crate::model::ConnectionConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration metadata for a database dialect
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DialectConfig {
    pub metadata: DialectMetadata,
    pub connection: ConnectionDefaults,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DialectMetadata {
    pub name: String,
    /// Stable identifier used in logs and import records
    pub dialect_id: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectionDefaults {
    pub default_port: u16,
    pub url_prefix: String,
    pub driver: String,
}

impl DialectConfig {
    /// Parse an embedded `dialect.toml`.
    pub fn parse(content: &str) -> Result<Self, DialectError> {
        let config: DialectConfig =
            toml::from_str(content).map_err(|e| DialectError::ConfigError(e.to_string()))?;

        if config.connection.default_port == 0 {
            return Err(DialectError::ConfigError(format!(
                "default_port for dialect '{}' must be positive",
                config.metadata.name
            )));
        }

        Ok(config)
    }
}

/// Base trait that all database dialects must implement
pub trait DatabaseDialect: Send + Sync {
    /// Get the dialect configuration
    fn config(&self) -> &DialectConfig;

    /// Registry name
    fn name(&self) -> &str {
        &self.config().metadata.name
    }

    fn aliases(&self) -> &[String] {
        &self.config().metadata.aliases
    }

    fn description(&self) -> &str {
        &self.config().metadata.description
    }

    fn dialect_id(&self) -> &str {
        &self.config().metadata.dialect_id
    }

    /// Port used when none was supplied
    fn default_port(&self) -> u16 {
        self.config().connection.default_port
    }

    fn driver(&self) -> &str {
        &self.config().connection.driver
    }

    /// Build the connection URL for one of the config's databases
    fn build_url(&self, config: &ConnectionConfig, database_name: &str) -> String;

    /// Driver properties passed alongside the URL. Never includes the password.
    fn driver_properties(&self, config: &ConnectionConfig) -> BTreeMap<String, String> {
        let mut properties = BTreeMap::new();
        properties.insert("user".to_string(), config.username().to_string());
        properties
    }

    /// Build an independent connection handle for one database name.
    ///
    /// Values the property channel left empty fail here rather than at
    /// resolution time.
    fn open_connection(
        &self,
        config: &ConnectionConfig,
        database_name: &str,
    ) -> Result<ConnectionHandle, ConnectionError> {
        if database_name.trim().is_empty() {
            return Err(ConnectionError::MissingParameter {
                parameter: "database name".to_string(),
                database: database_name.to_string(),
            });
        }
        if !config.database_names().iter().any(|n| n == database_name) {
            return Err(ConnectionError::UnknownDatabase {
                database: database_name.to_string(),
            });
        }
        if config.host().trim().is_empty() {
            return Err(ConnectionError::MissingParameter {
                parameter: "host".to_string(),
                database: database_name.to_string(),
            });
        }
        if config.username().trim().is_empty() {
            return Err(ConnectionError::MissingParameter {
                parameter: "username".to_string(),
                database: database_name.to_string(),
            });
        }

        Ok(ConnectionHandle {
            dialect_id: self.dialect_id().to_string(),
            driver: self.driver().to_string(),
            database_name: database_name.to_string(),
            url: self.build_url(config, database_name),
            username: config.username().to_string(),
            password: config.password().clone(),
            use_ssl: config.use_ssl(),
            properties: self.driver_properties(config),
        })
    }
}

/// Error types for dialect operations
#[derive(Debug, thiserror::Error)]
pub enum DialectError {
    #[error("Dialect not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dialect_config() {
        let config = DialectConfig::parse(
            r#"
[metadata]
name = "example"
dialect_id = "Example"
aliases = ["ex"]
description = "Example database"

[connection]
default_port = 1234
url_prefix = "jdbc:example://"
driver = "com.example.Driver"
"#,
        )
        .unwrap();

        assert_eq!(config.metadata.name, "example");
        assert_eq!(config.metadata.aliases, vec!["ex"]);
        assert_eq!(config.connection.default_port, 1234);
    }

    #[test]
    fn test_parse_rejects_zero_port() {
        let result = DialectConfig::parse(
            r#"
[metadata]
name = "example"
dialect_id = "Example"
description = "Example database"

[connection]
default_port = 0
url_prefix = "jdbc:example://"
driver = "com.example.Driver"
"#,
        );
        assert!(matches!(result, Err(DialectError::ConfigError(_))));
    }

    #[test]
    fn test_parse_rejects_invalid_toml() {
        let result = DialectConfig::parse("[metadata");
        assert!(matches!(result, Err(DialectError::ConfigError(_))));
    }
}
