//! Storage Layer
//!
//! SQLite persistence through a shared sqlx connection pool. Every mutating
//! call runs in its own transaction; an error drops the transaction, which
//! rolls it back.
//!
//! # Components
//!
//! - [`HeroStore`]: `heroes` table and the hero → powers join
//! - [`PowerStore`]: `powers` table and the power → heroes join
//! - [`HeroPowerStore`]: insert-only `hero_powers` links
//! - [`StorageBuilder`] / [`StorageHandles`]: Initialization and lifecycle management

mod builder;
pub mod db;
mod error;
mod hero_power_store;
mod hero_store;
mod power_store;
mod schema;

pub use builder::{StorageBuilder, StorageHandles};
pub use db::SqlitePool;
pub use error::StorageError;
pub use hero_power_store::HeroPowerStore;
pub use hero_store::HeroStore;
pub use power_store::PowerStore;
