//! Password hashing and verification utilities.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use groundwork_database::HashedPassword;

use crate::types::errors::UserError;

/// Hash a plaintext password with Argon2.
pub fn hash_password(password: &str) -> Result<HashedPassword, UserError> {
    let salt = SaltString::generate(&mut OsRng);

    let digest = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| UserError::PasswordHash)?
        .to_string();

    Ok(HashedPassword::new(digest))
}

/// Verify a plaintext password against a stored digest.
pub fn verify_password(password: &str, digest: &str) -> Result<bool, UserError> {
    let parsed = PasswordHash::new(digest).map_err(|_| UserError::PasswordHash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
