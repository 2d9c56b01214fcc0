pub mod connection;

pub use connection::{ConnectionError, ConnectionHandle};
