use crate::dialects::base::{DatabaseDialect, DialectConfig};
use crate::model::ConnectionConfig;
use std::sync::OnceLock;

static CONFIG: OnceLock<DialectConfig> = OnceLock::new();

/// Oracle thin-driver URLs, addressing the database as a service name.
pub struct OracleDialect {
    config: &'static DialectConfig,
}

impl OracleDialect {
    pub fn new() -> Self {
        let config = CONFIG.get_or_init(|| {
            DialectConfig::parse(include_str!("dialect.toml"))
                .expect("Failed to parse Oracle dialect config")
        });

        Self { config }
    }
}

impl Default for OracleDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseDialect for OracleDialect {
    fn config(&self) -> &DialectConfig {
        self.config
    }

    fn build_url(&self, config: &ConnectionConfig, database_name: &str) -> String {
        let protocol = if config.use_ssl() { "tcps://" } else { "//" };
        format!(
            "{}{}{}:{}/{}",
            self.config.connection.url_prefix,
            protocol,
            config.host(),
            config.port(),
            database_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{resolve_from_structured_input, StructuredInput};
    use secrecy::SecretString;

    fn config(ssl: bool) -> ConnectionConfig {
        let input = StructuredInput {
            host: Some("ora".to_string()),
            database_names: Some("ORCLPDB1".to_string()),
            username: Some("scott".to_string()),
            password: Some(SecretString::new("tiger".to_string())),
            ssl: Some(ssl),
            ..StructuredInput::default()
        };
        resolve_from_structured_input(&input, &OracleDialect::new()).unwrap()
    }

    #[test]
    fn test_build_url() {
        let dialect = OracleDialect::new();
        assert_eq!(
            dialect.build_url(&config(false), "ORCLPDB1"),
            "jdbc:oracle:thin:@//ora:1521/ORCLPDB1"
        );
        assert_eq!(
            dialect.build_url(&config(true), "ORCLPDB1"),
            "jdbc:oracle:thin:@tcps://ora:1521/ORCLPDB1"
        );
    }

    #[test]
    fn test_default_driver_properties() {
        let properties = OracleDialect::new().driver_properties(&config(false));
        assert_eq!(properties.len(), 1);
        assert_eq!(properties.get("user").map(String::as_str), Some("scott"));
    }
}
