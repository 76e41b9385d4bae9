//! Item repository.

use chrono::Utc;
use sqlx::FromRow;
use uuid::Uuid;

use super::convert;
use super::{ItemReader, ItemWriter};
use crate::entities::Item;
use crate::session::Session;
use crate::types::errors::DbResult;

#[derive(FromRow)]
struct ItemRow {
    id: String,
    type_id: i64,
}

impl ItemRow {
    fn into_item(self) -> DbResult<Item> {
        let id = convert::uuid_from_db(&self.id)?;
        let type_id = convert::type_id_from_db(self.type_id)?;
        Ok(Item::from_source(id, type_id))
    }
}

/// sqlx-backed implementation of the item store traits.
#[derive(Clone, Default)]
pub struct ItemRepository;

impl ItemRepository {
    pub fn new() -> Self {
        Self
    }
}

impl ItemReader for ItemRepository {
    async fn get_item(&self, session: &Session, id: Uuid) -> DbResult<Item> {
        let row: ItemRow = session
            .fetch_one(
                sqlx::query_as("SELECT id, type_id FROM items WHERE id = $1")
                    .bind(id.to_string()),
            )
            .await?;
        row.into_item()
    }

    async fn list_items(&self, session: &Session, limit: i64, offset: i64) -> DbResult<Vec<Item>> {
        let rows: Vec<ItemRow> = session
            .fetch_all(
                sqlx::query_as(
                    "SELECT id, type_id FROM items ORDER BY created_at, id LIMIT $1 OFFSET $2",
                )
                .bind(limit)
                .bind(offset),
            )
            .await?;
        rows.into_iter().map(ItemRow::into_item).collect()
    }
}

impl ItemWriter for ItemRepository {
    async fn create_item(&self, session: &Session, item: &Item) -> DbResult<Item> {
        let now = Utc::now().to_rfc3339();

        let row: ItemRow = session
            .fetch_one(
                sqlx::query_as(
                    "INSERT INTO items (id, type_id, created_at, updated_at) \
                     VALUES ($1, $2, $3, $4) RETURNING id, type_id",
                )
                .bind(item.id().to_string())
                .bind(convert::type_id_to_db(item.type_id()))
                .bind(now.clone())
                .bind(now),
            )
            .await?;
        row.into_item()
    }

    async fn update_item(&self, session: &Session, item: &Item) -> DbResult<Item> {
        let now = Utc::now().to_rfc3339();

        let row: ItemRow = session
            .fetch_one(
                sqlx::query_as(
                    "UPDATE items SET type_id = $1, updated_at = $2 WHERE id = $3 \
                     RETURNING id, type_id",
                )
                .bind(convert::type_id_to_db(item.type_id()))
                .bind(now)
                .bind(item.id().to_string()),
            )
            .await?;
        row.into_item()
    }

    async fn delete_item(&self, session: &Session, id: Uuid) -> DbResult<()> {
        session
            .execute(sqlx::query("DELETE FROM items WHERE id = $1").bind(id.to_string()))
            .await?;
        Ok(())
    }
}
