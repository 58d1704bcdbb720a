//! # Polis Config
//!
//! Configuration types for the Polis registry, loaded from environment variables:
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: listen address
//! - [`database`]: PostgreSQL connection settings
//! - [`repository`]: storage backend selection
//!
//! # Example
//!
//! ```ignore
//! use polis_config::{CorsConfig, DatabaseConfig, RepositoryKind, ServerConfig};
//!
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env()?;
//! let repository_kind = RepositoryKind::from_env()?;
//! let database_config = DatabaseConfig::from_env()?;
//! ```

pub mod cors;
pub mod database;
pub mod repository;
pub mod server;

use thiserror::Error;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use repository::RepositoryKind;
pub use server::ServerConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be set")]
    Missing { name: &'static str },
    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}
