//! Turns raw import input into a [`ConnectionConfig`].
//!
//! Two channels feed the resolver. The structured channel (form fields) is
//! strict and reports missing required fields. The property channel (flat
//! `.properties` files for unattended imports) never fails: bad values fall
//! back to defaults and missing values stay empty, so the failure surfaces
//! when a connection is opened.

use crate::dialects::DatabaseDialect;
use crate::model::{ConnectionConfig, ImportPolicy};
use crate::params::properties::Properties;
use crate::params::schema::{self, ParameterField};
use log::{debug, warn};
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

pub const PROPERTY_HOST: &str = "import.database.host";
pub const PROPERTY_NAME: &str = "import.database.name";
pub const PROPERTY_NAMES: &str = "import.database.names";
pub const PROPERTY_USERNAME: &str = "import.database.username";
pub const PROPERTY_PASSWORD: &str = "import.database.password";
pub const PROPERTY_SSL: &str = "import.database.ssl";
pub const PROPERTY_PORT: &str = "import.database.port";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Required parameter '{key}' is missing or empty")]
    MissingField { key: &'static str },

    #[error("Unknown parameter '{key}'")]
    UnknownField { key: String },

    #[error("Invalid value for parameter '{key}': '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

impl ValidationError {
    /// Key of the offending parameter
    pub fn key(&self) -> &str {
        match self {
            ValidationError::MissingField { key } => key,
            ValidationError::UnknownField { key } => key,
            ValidationError::InvalidValue { key, .. } => key,
        }
    }
}

/// Source of folder ids for unattended imports.
pub trait FolderIdGenerator {
    fn next_folder_id(&self) -> Uuid;
}

/// Random (v4) folder ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomFolderIds;

impl FolderIdGenerator for RandomFolderIds {
    fn next_folder_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

impl<F: Fn() -> Uuid> FolderIdGenerator for F {
    fn next_folder_id(&self) -> Uuid {
        self()
    }
}

/// Values supplied through the structured (form) channel.
#[derive(Debug, Clone, Default)]
pub struct StructuredInput {
    pub host: Option<String>,
    /// Comma separated database names
    pub database_names: Option<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub port: Option<u16>,
    pub ssl: Option<bool>,
    pub name_suffix: Option<String>,
    pub policy: ImportPolicy,
}

impl StructuredInput {
    /// Build input from string form values keyed by schema keys.
    ///
    /// Empty values count as not supplied. Port and SSL must parse; this
    /// channel does not fall back on malformed values.
    pub fn from_field_values<I, K, V>(values: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut input = StructuredInput::default();

        for (key, value) in values {
            let key = key.as_ref();
            let field = schema::field(key).ok_or_else(|| ValidationError::UnknownField {
                key: key.to_string(),
            })?;
            let value: String = value.into();
            if value.trim().is_empty() {
                continue;
            }

            match field.key {
                schema::DATABASE_HOST => input.host = Some(value),
                schema::DATABASE_NAMES => input.database_names = Some(value),
                schema::DATABASE_USERNAME => input.username = Some(value),
                schema::DATABASE_PASSWORD => input.password = Some(SecretString::new(value)),
                schema::DATA_MODEL_NAME_SUFFIX => input.name_suffix = Some(value),
                schema::DATABASE_PORT => input.port = Some(parse_strict_port(field, &value)?),
                schema::DATABASE_SSL => input.ssl = Some(parse_strict_bool(field, &value)?),
                _ => unreachable!("schema key without structured mapping: {}", field.key),
            }
        }

        Ok(input)
    }
}

fn parse_strict_port(field: &ParameterField, value: &str) -> Result<u16, ValidationError> {
    match value.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ValidationError::InvalidValue {
            key: field.key,
            value: value.to_string(),
        }),
    }
}

fn parse_strict_bool(field: &ParameterField, value: &str) -> Result<bool, ValidationError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ValidationError::InvalidValue {
            key: field.key,
            value: value.to_string(),
        }),
    }
}

/// Split a comma separated list into trimmed, non-empty names, keeping order.
pub fn split_database_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// True when more than one database is named.
pub fn is_multi_database_import(config: &ConnectionConfig) -> bool {
    config.is_multi_database_import()
}

/// Resolve structured input against a dialect.
///
/// Required fields are checked in presentation order and the first one
/// that is absent or blank is reported. An unset port takes the dialect's
/// default, once, here.
pub fn resolve_from_structured_input(
    input: &StructuredInput,
    dialect: &dyn DatabaseDialect,
) -> Result<ConnectionConfig, ValidationError> {
    debug!("Resolving structured input for dialect {}", dialect.name());

    let database_names = input
        .database_names
        .as_deref()
        .map(split_database_names)
        .unwrap_or_default();

    for field in schema::required_fields() {
        let present = match field.key {
            schema::DATABASE_HOST => is_present(input.host.as_deref()),
            schema::DATABASE_USERNAME => is_present(input.username.as_deref()),
            schema::DATABASE_PASSWORD => input
                .password
                .as_ref()
                .is_some_and(|p| !p.expose_secret().is_empty()),
            schema::DATABASE_NAMES => !database_names.is_empty(),
            _ => true,
        };
        if !present {
            return Err(ValidationError::MissingField { key: field.key });
        }
    }

    let port = match input.port {
        Some(0) => {
            return Err(ValidationError::InvalidValue {
                key: schema::DATABASE_PORT,
                value: "0".to_string(),
            });
        }
        Some(port) => port,
        None => {
            debug!("No port supplied, using default {}", dialect.default_port());
            dialect.default_port()
        }
    };

    Ok(ConnectionConfig {
        host: input.host.clone().unwrap_or_default(),
        database_names,
        username: input.username.clone().unwrap_or_default(),
        password: input
            .password
            .clone()
            .unwrap_or_else(|| SecretString::new(String::new())),
        port,
        use_ssl: input.ssl.unwrap_or(false),
        name_suffix: input.name_suffix.clone().filter(|s| !s.trim().is_empty()),
        dialect_id: dialect.dialect_id().to_string(),
        policy: input.policy,
    })
}

fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Resolve a property bag against a dialect.
///
/// Never fails. `import.database.name` wins over `import.database.names`
/// when present. SSL is true only for a case-insensitive `"true"`. A missing
/// or non-numeric port takes the dialect default. Missing values stay empty.
/// The import is always finalised, never a new documentation version, and
/// placed in a freshly generated folder.
pub fn resolve_from_properties(
    properties: &Properties,
    dialect: &dyn DatabaseDialect,
    folder_ids: &dyn FolderIdGenerator,
) -> ConnectionConfig {
    debug!(
        "Resolving {} properties for dialect {}",
        properties.len(),
        dialect.name()
    );

    let policy = ImportPolicy::unattended(folder_ids.next_folder_id());

    let host = string_property(properties, PROPERTY_HOST);
    let username = string_property(properties, PROPERTY_USERNAME);

    let password = match properties.get(PROPERTY_PASSWORD) {
        Some(value) => value.to_string(),
        None => {
            warn!("Property '{}' is not set", PROPERTY_PASSWORD);
            String::new()
        }
    };

    let names_key = if properties.contains_key(PROPERTY_NAME) {
        PROPERTY_NAME
    } else {
        PROPERTY_NAMES
    };
    let database_names = split_database_names(&string_property(properties, names_key));

    let use_ssl = match properties.get(PROPERTY_SSL) {
        Some(value) => {
            let parsed = value.eq_ignore_ascii_case("true");
            if !parsed && !value.eq_ignore_ascii_case("false") {
                warn!(
                    "Property '{}' has non-boolean value '{}', treating as false",
                    PROPERTY_SSL, value
                );
            }
            parsed
        }
        None => false,
    };

    let port = match properties.get(PROPERTY_PORT) {
        Some(value) => match value.parse::<u16>() {
            Ok(port) if port > 0 => port,
            _ => {
                warn!(
                    "Property '{}' has invalid value '{}', using default port {}",
                    PROPERTY_PORT,
                    value,
                    dialect.default_port()
                );
                dialect.default_port()
            }
        },
        None => {
            debug!("No port property, using default {}", dialect.default_port());
            dialect.default_port()
        }
    };

    ConnectionConfig {
        host,
        database_names,
        username,
        password: SecretString::new(password),
        port,
        use_ssl,
        name_suffix: None,
        dialect_id: dialect.dialect_id().to_string(),
        policy,
    }
}

fn string_property(properties: &Properties, key: &str) -> String {
    match properties.get(key) {
        Some(value) => value.to_string(),
        None => {
            warn!("Property '{}' is not set", key);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialects::postgres::PostgresDialect;

    fn fixed_id() -> Uuid {
        Uuid::from_u128(0x42)
    }

    fn complete_input() -> StructuredInput {
        StructuredInput {
            host: Some("db1".to_string()),
            database_names: Some("sales".to_string()),
            username: Some("u".to_string()),
            password: Some(SecretString::new("p".to_string())),
            ..StructuredInput::default()
        }
    }

    #[test]
    fn test_split_database_names() {
        assert_eq!(split_database_names("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(split_database_names("  sales  "), vec!["sales"]);
        assert_eq!(split_database_names("a,,b, ,"), vec!["a", "b"]);
        assert!(split_database_names("").is_empty());
        assert!(split_database_names(" , ").is_empty());
    }

    #[test]
    fn test_structured_defaults() {
        let config = resolve_from_structured_input(&complete_input(), &PostgresDialect::new()).unwrap();

        assert_eq!(config.port(), 5432);
        assert!(!config.use_ssl());
        assert_eq!(config.name_suffix(), None);
        assert_eq!(config.dialect_id(), "PostgreSQL");
        assert_eq!(*config.policy(), ImportPolicy::default());
    }

    #[test]
    fn test_structured_missing_reports_first_in_order() {
        let input = StructuredInput::default();
        let err = resolve_from_structured_input(&input, &PostgresDialect::new()).unwrap_err();
        assert_eq!(err.key(), schema::DATABASE_HOST);
    }

    #[test]
    fn test_structured_blank_suffix_dropped() {
        let input = StructuredInput {
            name_suffix: Some("  ".to_string()),
            ..complete_input()
        };
        let config = resolve_from_structured_input(&input, &PostgresDialect::new()).unwrap();
        assert_eq!(config.name_suffix(), None);
    }

    #[test]
    fn test_from_field_values() {
        let input = StructuredInput::from_field_values([
            ("database_host", "db1"),
            ("database_names", "a,b"),
            ("database_port", "6543"),
            ("database_ssl", "TRUE"),
            ("data_model_name_suffix", ""),
        ])
        .unwrap();

        assert_eq!(input.host.as_deref(), Some("db1"));
        assert_eq!(input.database_names.as_deref(), Some("a,b"));
        assert_eq!(input.port, Some(6543));
        assert_eq!(input.ssl, Some(true));
        assert_eq!(input.name_suffix, None);
    }

    #[test]
    fn test_from_field_values_rejects_unknown_key() {
        let err = StructuredInput::from_field_values([("database_colour", "blue")]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownField {
                key: "database_colour".to_string()
            }
        );
    }

    #[test]
    fn test_from_field_values_rejects_bad_port_and_ssl() {
        for bad in ["bad", "0", "70000", "-1"] {
            let err = StructuredInput::from_field_values([("database_port", bad)]).unwrap_err();
            assert_eq!(err.key(), schema::DATABASE_PORT);
        }
        let err = StructuredInput::from_field_values([("database_ssl", "yes")]).unwrap_err();
        assert_eq!(err.key(), schema::DATABASE_SSL);
    }

    #[test]
    fn test_properties_force_unattended_policy() {
        let properties: Properties = [(PROPERTY_HOST, "db1")].into_iter().collect();
        let config = resolve_from_properties(&properties, &PostgresDialect::new(), &fixed_id);

        assert!(config.policy().finalised);
        assert!(!config.policy().import_as_new_documentation_version);
        assert_eq!(config.policy().folder_id, Some(fixed_id()));
    }

    #[test]
    fn test_properties_generate_fresh_folder_ids() {
        let properties = Properties::new();
        let dialect = PostgresDialect::new();
        let first = resolve_from_properties(&properties, &dialect, &RandomFolderIds);
        let second = resolve_from_properties(&properties, &dialect, &RandomFolderIds);
        assert_ne!(first.policy().folder_id, second.policy().folder_id);
    }

    #[test]
    fn test_properties_empty_name_key_still_wins() {
        let properties: Properties = [(PROPERTY_NAME, ""), (PROPERTY_NAMES, "a,b")]
            .into_iter()
            .collect();
        let config = resolve_from_properties(&properties, &PostgresDialect::new(), &fixed_id);
        assert!(config.database_names().is_empty());
    }

    #[test]
    fn test_properties_out_of_range_port_falls_back() {
        let properties: Properties = [(PROPERTY_PORT, "70000")].into_iter().collect();
        let config = resolve_from_properties(&properties, &PostgresDialect::new(), &fixed_id);
        assert_eq!(config.port(), 5432);
    }
}
