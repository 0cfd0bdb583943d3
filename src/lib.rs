//! Superhero - heroes, powers and how strongly they wield them
//!
//! This crate provides a small JSON API over three SQLite tables. It can be
//! used as a library (build the storage layer and router yourself) or run as
//! the standalone `superhero` binary.
//!
//! # Architecture
//!
//! - **Model**: validated [`Hero`], [`Power`] and [`HeroPower`] records
//! - **Storage**: sqlx/SQLite persistence with one transaction per write
//! - **Server**: Axum router with CRUD-style endpoints
//! - **Seed**: optional YAML demo data loaded into an empty database
//!
//! # Example
//!
//! ```rust,ignore
//! use superhero::{StorageBuilder, server::{AppState, create_router}};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let handles = StorageBuilder::new("sqlite:app.db?mode=rwc").build().await?;
//!     let app = create_router(AppState::from_handles(&handles));
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5555").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod model;
pub mod seed;
pub mod server;
pub mod storage;

pub use config::{AppConfig, ConfigError};
pub use model::{Hero, HeroPower, Power, Strength, ValidationError};
pub use seed::{SeedData, SeedError, SeedResult};
pub use storage::{StorageBuilder, StorageError, StorageHandles};
