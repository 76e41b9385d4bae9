//! Item entity.

use uuid::Uuid;

/// An item with a type classifier into an external taxonomy.
///
/// The classifier is non-negative by construction; rejecting bad stored
/// values is the persistence layer's job (see `repos::convert`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: Uuid,
    type_id: u32,
}

impl Item {
    /// A new item with a freshly generated identity.
    pub fn new(type_id: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            type_id,
        }
    }

    /// An item re-hydrated from storage.
    pub fn from_source(id: Uuid, type_id: u32) -> Self {
        Self { id, type_id }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn type_id(&self) -> u32 {
        self.type_id
    }
}
