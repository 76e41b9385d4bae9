//! Helpers for converting between database and domain representations.

use uuid::Uuid;

use crate::types::errors::{DbError, DbResult};

/// Convert a stored BIGINT classifier to the domain's non-negative type id.
pub fn type_id_from_db(raw: i64) -> DbResult<u32> {
    u32::try_from(raw).map_err(|_| DbError::InvalidColumn(format!("type_id out of range: {raw}")))
}

/// Convert a domain type id to its storage representation.
pub fn type_id_to_db(type_id: u32) -> i64 {
    i64::from(type_id)
}

/// Parse a TEXT identity column back into a UUID.
pub fn uuid_from_db(raw: &str) -> DbResult<Uuid> {
    Uuid::parse_str(raw).map_err(|err| DbError::InvalidColumn(format!("malformed uuid {raw}: {err}")))
}
