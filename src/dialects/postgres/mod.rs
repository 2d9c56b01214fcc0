use crate::dialects::base::{DatabaseDialect, DialectConfig};
use crate::model::ConnectionConfig;
use std::collections::BTreeMap;
use std::sync::OnceLock;

static CONFIG: OnceLock<DialectConfig> = OnceLock::new();

pub struct PostgresDialect {
    config: &'static DialectConfig,
}

impl PostgresDialect {
    pub fn new() -> Self {
        let config = CONFIG.get_or_init(|| {
            DialectConfig::parse(include_str!("dialect.toml"))
                .expect("Failed to parse PostgreSQL dialect config")
        });

        Self { config }
    }
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseDialect for PostgresDialect {
    fn config(&self) -> &DialectConfig {
        self.config
    }

    fn build_url(&self, config: &ConnectionConfig, database_name: &str) -> String {
        let mut url = format!(
            "{}{}:{}/{}",
            self.config.connection.url_prefix,
            config.host(),
            config.port(),
            database_name
        );
        if config.use_ssl() {
            url.push_str("?ssl=true&sslmode=require");
        }
        url
    }

    fn driver_properties(&self, config: &ConnectionConfig) -> BTreeMap<String, String> {
        let mut properties = BTreeMap::new();
        properties.insert("user".to_string(), config.username().to_string());
        properties.insert("ssl".to_string(), config.use_ssl().to_string());
        properties
    }
}
