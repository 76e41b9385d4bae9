//! Repository traits and implementations.
//!
//! The traits are split by capability so a consumer that only reads an
//! entity never depends on its write operations. All methods take the
//! current [`Session`] explicitly; whether that session wraps a
//! transaction is the caller's business.

pub mod convert;
pub mod item_repository;
pub mod user_repository;

pub use item_repository::ItemRepository;
pub use user_repository::UserRepository;

use std::future::Future;

use uuid::Uuid;

use crate::entities::{Item, User};
use crate::session::Session;
use crate::types::errors::DbResult;

/// Read operations for users.
pub trait UserReader {
    fn get_user(&self, session: &Session, id: Uuid)
        -> impl Future<Output = DbResult<User>> + Send;

    fn get_user_by_email(
        &self,
        session: &Session,
        email: &str,
    ) -> impl Future<Output = DbResult<User>> + Send;

    fn list_users(
        &self,
        session: &Session,
        limit: i64,
        offset: i64,
    ) -> impl Future<Output = DbResult<Vec<User>>> + Send;
}

/// Write operations for users.
pub trait UserWriter {
    fn create_user(
        &self,
        session: &Session,
        user: &User,
    ) -> impl Future<Output = DbResult<User>> + Send;

    fn update_user(
        &self,
        session: &Session,
        user: &User,
    ) -> impl Future<Output = DbResult<User>> + Send;

    fn delete_user(&self, session: &Session, id: Uuid)
        -> impl Future<Output = DbResult<()>> + Send;
}

/// Read operations for items.
pub trait ItemReader {
    fn get_item(&self, session: &Session, id: Uuid)
        -> impl Future<Output = DbResult<Item>> + Send;

    fn list_items(
        &self,
        session: &Session,
        limit: i64,
        offset: i64,
    ) -> impl Future<Output = DbResult<Vec<Item>>> + Send;
}

/// Write operations for items.
pub trait ItemWriter {
    fn create_item(
        &self,
        session: &Session,
        item: &Item,
    ) -> impl Future<Output = DbResult<Item>> + Send;

    fn update_item(
        &self,
        session: &Session,
        item: &Item,
    ) -> impl Future<Output = DbResult<Item>> + Send;

    fn delete_item(&self, session: &Session, id: Uuid)
        -> impl Future<Output = DbResult<()>> + Send;
}
