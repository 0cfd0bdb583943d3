//! Configuration module for the superhero service.
//!
//! Provides YAML-based configuration loading and validation for:
//! - Server settings (port, bind address)
//! - Database settings (connection URL, pool size, acquire timeout)
//! - Optional seed data file

mod app;
mod validation;

pub use app::{AppConfig, DatabaseConfig, ServerConfig};
pub use validation::{ConfigError, expand_env_vars};

// Re-export constants
pub use app::{DEFAULT_DATABASE_URL, DEFAULT_PORT};
