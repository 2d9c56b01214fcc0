use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use uuid::Uuid;

/// Import decisions that travel with a resolved connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportPolicy {
    pub finalised: bool,
    pub import_as_new_documentation_version: bool,
    /// Folder the imported models are placed in.
    pub folder_id: Option<Uuid>,
}

impl ImportPolicy {
    /// Policy for unattended imports: finished, freestanding models in a new folder.
    pub fn unattended(folder_id: Uuid) -> Self {
        Self {
            finalised: true,
            import_as_new_documentation_version: false,
            folder_id: Some(folder_id),
        }
    }
}

/// Fully resolved connection parameters for one import request.
///
/// Built only by the resolver and never mutated afterwards. The port is
/// always concrete; the password is kept behind [`SecretString`] and is
/// masked by the `Display` impl.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub(crate) host: String,
    pub(crate) database_names: Vec<String>,
    pub(crate) username: String,
    pub(crate) password: SecretString,
    pub(crate) port: u16,
    pub(crate) use_ssl: bool,
    pub(crate) name_suffix: Option<String>,
    pub(crate) dialect_id: String,
    pub(crate) policy: ImportPolicy,
}

impl ConnectionConfig {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn database_names(&self) -> &[String] {
        &self.database_names
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn use_ssl(&self) -> bool {
        self.use_ssl
    }

    pub fn name_suffix(&self) -> Option<&str> {
        self.name_suffix.as_deref()
    }

    pub fn dialect_id(&self) -> &str {
        &self.dialect_id
    }

    pub fn policy(&self) -> &ImportPolicy {
        &self.policy
    }

    /// More than one database named: one model per database, any single
    /// model-name override is ignored.
    pub fn is_multi_database_import(&self) -> bool {
        self.database_names.len() > 1
    }
}

impl fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.expose_secret().is_empty() {
            "<empty>"
        } else {
            "****"
        };
        write!(
            f,
            "dialect={} host={} port={} databases=[{}] username={} password={} ssl={}",
            self.dialect_id,
            self.host,
            self.port,
            self.database_names.join(", "),
            self.username,
            password,
            self.use_ssl
        )?;
        if let Some(suffix) = &self.name_suffix {
            write!(f, " suffix={}", suffix)?;
        }
        Ok(())
    }
}
