//! User entity.

use uuid::Uuid;

/// Argon2 digest of a user password. Never holds the plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    pub fn new(digest: String) -> Self {
        Self(digest)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A user. Constructed once, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct User {
    id: Uuid,
    name: String,
    email: String,
    password: Option<HashedPassword>,
}

impl User {
    /// A new user with a freshly generated identity.
    ///
    /// `password` must already be hashed; the entity never sees the
    /// plaintext.
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: HashedPassword) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password: Some(password),
        }
    }

    /// A user re-hydrated from storage. Reads never load the digest.
    pub fn from_source(id: Uuid, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            password: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> Option<&HashedPassword> {
        self.password.as_ref()
    }
}
