//! User repository.

use chrono::Utc;
use sqlx::FromRow;
use uuid::Uuid;

use super::convert;
use super::{UserReader, UserWriter};
use crate::entities::User;
use crate::session::Session;
use crate::types::errors::{DbError, DbResult};

#[derive(FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
}

impl UserRow {
    fn into_user(self) -> DbResult<User> {
        let id = convert::uuid_from_db(&self.id)?;
        Ok(User::from_source(id, self.name, self.email))
    }
}

/// sqlx-backed implementation of the user store traits.
#[derive(Clone, Default)]
pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self
    }
}

impl UserReader for UserRepository {
    async fn get_user(&self, session: &Session, id: Uuid) -> DbResult<User> {
        let row: UserRow = session
            .fetch_one(
                sqlx::query_as("SELECT id, name, email FROM users WHERE id = $1")
                    .bind(id.to_string()),
            )
            .await?;
        row.into_user()
    }

    async fn get_user_by_email(&self, session: &Session, email: &str) -> DbResult<User> {
        let row: UserRow = session
            .fetch_one(
                sqlx::query_as("SELECT id, name, email FROM users WHERE email = $1")
                    .bind(email.to_string()),
            )
            .await?;
        row.into_user()
    }

    async fn list_users(&self, session: &Session, limit: i64, offset: i64) -> DbResult<Vec<User>> {
        let rows: Vec<UserRow> = session
            .fetch_all(
                sqlx::query_as(
                    "SELECT id, name, email FROM users ORDER BY created_at, id LIMIT $1 OFFSET $2",
                )
                .bind(limit)
                .bind(offset),
            )
            .await?;
        rows.into_iter().map(UserRow::into_user).collect()
    }
}

impl UserWriter for UserRepository {
    async fn create_user(&self, session: &Session, user: &User) -> DbResult<User> {
        let digest = user.password().ok_or_else(|| {
            DbError::InvalidColumn("a password digest is required to create a user".to_string())
        })?;
        let now = Utc::now().to_rfc3339();

        let row: UserRow = session
            .fetch_one(
                sqlx::query_as(
                    "INSERT INTO users (id, name, email, password, created_at, updated_at) \
                     VALUES ($1, $2, $3, $4, $5, $6) RETURNING id, name, email",
                )
                .bind(user.id().to_string())
                .bind(user.name().to_string())
                .bind(user.email().to_string())
                .bind(digest.as_str().to_string())
                .bind(now.clone())
                .bind(now),
            )
            .await?;
        row.into_user()
    }

    async fn update_user(&self, session: &Session, user: &User) -> DbResult<User> {
        let now = Utc::now().to_rfc3339();

        let row: UserRow = session
            .fetch_one(
                sqlx::query_as(
                    "UPDATE users SET name = $1, updated_at = $2 WHERE id = $3 \
                     RETURNING id, name, email",
                )
                .bind(user.name().to_string())
                .bind(now)
                .bind(user.id().to_string()),
            )
            .await?;
        row.into_user()
    }

    async fn delete_user(&self, session: &Session, id: Uuid) -> DbResult<()> {
        session
            .execute(sqlx::query("DELETE FROM users WHERE id = $1").bind(id.to_string()))
            .await?;
        Ok(())
    }
}
