pub mod config;
pub mod connection;

pub use config::{Config, ConfigError, ConfigOverlay};
pub use connection::{ConnectionConfig, ImportPolicy};
