use secrecy::SecretString;
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("Missing connection parameter '{parameter}' for database '{database}'")]
    MissingParameter { parameter: String, database: String },

    #[error("Database '{database}' is not part of this import")]
    UnknownDatabase { database: String },
}

/// Driver-ready description of one data source.
///
/// Holds everything the connection layer needs to open the physical
/// connection; no socket is opened here.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    pub(crate) dialect_id: String,
    pub(crate) driver: String,
    pub(crate) database_name: String,
    pub(crate) url: String,
    pub(crate) username: String,
    pub(crate) password: SecretString,
    pub(crate) use_ssl: bool,
    pub(crate) properties: BTreeMap<String, String>,
}

impl ConnectionHandle {
    pub fn dialect_id(&self) -> &str {
        &self.dialect_id
    }

    /// Driver class or name the connection layer should load
    pub fn driver(&self) -> &str {
        &self.driver
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    pub fn use_ssl(&self) -> bool {
        self.use_ssl
    }

    /// Extra driver properties; never contains the password.
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }
}
