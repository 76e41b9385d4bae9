//! Request types for user operations.

use serde::Deserialize;

use crate::types::errors::UserError;

/// Input for creating a user.
///
/// Fields default to empty so a body with missing keys still reaches
/// validation and gets a field-specific error instead of a bind failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl CreateUserInput {
    /// Check the rules in priority order and return the first violation.
    pub fn validate(&self) -> Result<(), UserError> {
        if self.name.is_empty() {
            return Err(UserError::NameRequired);
        }

        if self.email.is_empty() {
            return Err(UserError::EmailRequired);
        }

        if self.password.is_empty() {
            return Err(UserError::PasswordRequired);
        }

        if self.password.chars().count() < 8 {
            return Err(UserError::PasswordTooShort);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, email: &str, password: &str) -> CreateUserInput {
        CreateUserInput {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(input("Ada", "ada@example.com", "long-enough").validate().is_ok());
    }

    #[test]
    fn violations_surface_in_priority_order() {
        // Name is checked first even when everything else is missing too.
        assert!(matches!(
            input("", "", "").validate(),
            Err(UserError::NameRequired)
        ));
        assert!(matches!(
            input("Ada", "", "").validate(),
            Err(UserError::EmailRequired)
        ));
        assert!(matches!(
            input("Ada", "ada@example.com", "").validate(),
            Err(UserError::PasswordRequired)
        ));
        assert!(matches!(
            input("Ada", "ada@example.com", "short").validate(),
            Err(UserError::PasswordTooShort)
        ));
    }

    #[test]
    fn eight_characters_is_enough() {
        assert!(input("Ada", "ada@example.com", "12345678").validate().is_ok());
    }
}
