use crate::dialects::base::{DatabaseDialect, DialectConfig};
use crate::model::ConnectionConfig;
use std::collections::BTreeMap;
use std::sync::OnceLock;

static CONFIG: OnceLock<DialectConfig> = OnceLock::new();

pub struct MysqlDialect {
    config: &'static DialectConfig,
}

impl MysqlDialect {
    pub fn new() -> Self {
        let config = CONFIG.get_or_init(|| {
            DialectConfig::parse(include_str!("dialect.toml"))
                .expect("Failed to parse MySQL dialect config")
        });

        Self { config }
    }
}

impl Default for MysqlDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseDialect for MysqlDialect {
    fn config(&self) -> &DialectConfig {
        self.config
    }

    fn build_url(&self, config: &ConnectionConfig, database_name: &str) -> String {
        format!(
            "{}{}:{}/{}?useSSL={}",
            self.config.connection.url_prefix,
            config.host(),
            config.port(),
            database_name,
            config.use_ssl()
        )
    }

    fn driver_properties(&self, config: &ConnectionConfig) -> BTreeMap<String, String> {
        let mut properties = BTreeMap::new();
        properties.insert("user".to_string(), config.username().to_string());
        properties.insert("useSSL".to_string(), config.use_ssl().to_string());
        properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{resolve_from_structured_input, StructuredInput};
    use secrecy::SecretString;

    #[test]
    fn test_build_url_with_explicit_port() {
        let dialect = MysqlDialect::new();
        let input = StructuredInput {
            host: Some("mysql01".to_string()),
            database_names: Some("shop".to_string()),
            username: Some("root".to_string()),
            password: Some(SecretString::new("pw".to_string())),
            port: Some(3307),
            ..StructuredInput::default()
        };
        let config = resolve_from_structured_input(&input, &dialect).unwrap();

        assert_eq!(
            dialect.build_url(&config, "shop"),
            "jdbc:mysql://mysql01:3307/shop?useSSL=false"
        );
        assert_eq!(config.dialect_id(), "MySQL");
    }

    #[test]
    fn test_default_port() {
        assert_eq!(MysqlDialect::new().default_port(), 3306);
    }
}
