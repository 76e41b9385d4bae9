//! Response types for user operations.

use groundwork_database::User;
use serde::Serialize;
use uuid::Uuid;

/// User shape returned to callers. Never carries the password digest.
#[derive(Debug, Clone, Serialize)]
pub struct UserOutput {
    pub id: Uuid,
    pub name: String,
}

impl From<&User> for UserOutput {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_string(),
        }
    }
}
