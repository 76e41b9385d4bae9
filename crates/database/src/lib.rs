//! Groundwork database crate.
//!
//! Provides connection management, embedded migrations, the
//! session/transaction manager, domain entities and the repository
//! implementations built on top of them.

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod session;
pub mod types;

pub use connection::prepare_database;
pub use entities::{HashedPassword, Item, User};
pub use migrations::{revert_last_migration, run_migrations, MIGRATOR};
pub use repos::{
    ItemReader, ItemRepository, ItemWriter, UserReader, UserRepository, UserWriter,
};
pub use session::{Session, TxManager};
pub use types::errors::{DbError, DbResult};

/// Re-export of the pool type for wiring code.
pub use sqlx::AnyPool;
