use crate::dialects::base::DatabaseDialect;
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Central registry for all available database dialects
pub struct DialectRegistry {
    dialects: HashMap<String, Arc<dyn DatabaseDialect>>,
    aliases: HashMap<String, String>, // alias -> dialect_name mapping
}

impl DialectRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            dialects: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Register a dialect in the registry
    pub fn register(&mut self, dialect: Arc<dyn DatabaseDialect>) {
        let name = dialect.name().to_lowercase();
        debug!("Registering dialect: {}", name);

        for alias in dialect.aliases() {
            self.aliases.insert(alias.to_lowercase(), name.clone());
        }

        self.dialects.insert(name, dialect);
    }

    /// Get a dialect by name or alias, ignoring case
    pub fn get(&self, name: &str) -> Option<Arc<dyn DatabaseDialect>> {
        let name = name.trim().to_lowercase();

        if let Some(dialect) = self.dialects.get(&name) {
            return Some(dialect.clone());
        }

        self.aliases
            .get(&name)
            .and_then(|dialect_name| self.dialects.get(dialect_name))
            .cloned()
    }

    /// List all registered dialect names, sorted
    pub fn list_dialects(&self) -> Vec<String> {
        let mut names: Vec<String> = self.dialects.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get all aliases for a dialect
    pub fn get_aliases(&self, dialect_name: &str) -> Vec<String> {
        let mut aliases: Vec<String> = self
            .aliases
            .iter()
            .filter(|(_, name)| *name == dialect_name)
            .map(|(alias, _)| alias.clone())
            .collect();
        aliases.sort();
        aliases
    }
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global registry instance, read-only once built
static GLOBAL_REGISTRY: OnceLock<DialectRegistry> = OnceLock::new();

/// Get the global dialect registry (initialized lazily)
pub fn get_registry() -> &'static DialectRegistry {
    GLOBAL_REGISTRY.get_or_init(create_default_registry)
}

/// Create registry with all built-in dialects
fn create_default_registry() -> DialectRegistry {
    let mut registry = DialectRegistry::new();

    registry.register(Arc::new(crate::dialects::postgres::PostgresDialect::new()));
    registry.register(Arc::new(crate::dialects::mysql::MysqlDialect::new()));
    registry.register(Arc::new(crate::dialects::sqlserver::SqlServerDialect::new()));
    registry.register(Arc::new(crate::dialects::oracle::OracleDialect::new()));

    registry
}
