use crate::dialects::base::{DatabaseDialect, DialectConfig};
use crate::model::ConnectionConfig;
use std::collections::BTreeMap;
use std::sync::OnceLock;

static CONFIG: OnceLock<DialectConfig> = OnceLock::new();

pub struct SqlServerDialect {
    config: &'static DialectConfig,
}

impl SqlServerDialect {
    pub fn new() -> Self {
        let config = CONFIG.get_or_init(|| {
            DialectConfig::parse(include_str!("dialect.toml"))
                .expect("Failed to parse SQL Server dialect config")
        });

        Self { config }
    }
}

impl Default for SqlServerDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseDialect for SqlServerDialect {
    fn config(&self) -> &DialectConfig {
        self.config
    }

    fn build_url(&self, config: &ConnectionConfig, database_name: &str) -> String {
        // SQL Server takes properties as `;key=value` pairs after the authority
        let mut parts = vec![format!(
            "{}{}:{}",
            self.config.connection.url_prefix,
            config.host(),
            config.port()
        )];
        parts.push(format!("databaseName={}", database_name));
        parts.push(format!("encrypt={}", config.use_ssl()));
        parts.join(";")
    }

    fn driver_properties(&self, config: &ConnectionConfig) -> BTreeMap<String, String> {
        let mut properties = BTreeMap::new();
        properties.insert("user".to_string(), config.username().to_string());
        properties.insert("encrypt".to_string(), config.use_ssl().to_string());
        properties
    }
}
