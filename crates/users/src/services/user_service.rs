//! User usecase orchestrating validation, hashing and persistence.

use groundwork_database::{DbError, Session, User, UserReader, UserWriter};
use tracing::info;
use uuid::Uuid;

use crate::types::errors::{UserError, UserResult};
use crate::types::requests::CreateUserInput;
use crate::types::responses::UserOutput;
use crate::utils::password;

/// Service for user operations, generic over the injected repository.
pub struct UserService<R> {
    repo: R,
    session: Session,
}

impl<R> UserService<R>
where
    R: UserReader + UserWriter,
{
    /// Create a new user service backed by `repo` and `session`.
    pub fn new(repo: R, session: Session) -> Self {
        Self { repo, session }
    }

    /// Get a user by id.
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserOutput> {
        let user = self
            .repo
            .get_user(&self.session, id)
            .await
            .map_err(not_found)?;
        Ok(UserOutput::from(&user))
    }

    /// Get a user by email.
    pub async fn get_user_by_email(&self, email: &str) -> UserResult<UserOutput> {
        let user = self
            .repo
            .get_user_by_email(&self.session, email)
            .await
            .map_err(not_found)?;
        Ok(UserOutput::from(&user))
    }

    /// List users, ordered by creation time.
    pub async fn list_users(&self, limit: i64, offset: i64) -> UserResult<Vec<UserOutput>> {
        let users = self.repo.list_users(&self.session, limit, offset).await?;
        Ok(users.iter().map(UserOutput::from).collect())
    }

    /// Validate input, hash the password and persist a new user.
    ///
    /// The plaintext exists only inside this call; the constructed entity
    /// carries the digest and the output carries neither.
    pub async fn create_user(&self, input: &CreateUserInput) -> UserResult<UserOutput> {
        input.validate()?;

        let digest = password::hash_password(&input.password)?;
        let user = User::new(input.name.clone(), input.email.clone(), digest);

        let created = self
            .repo
            .create_user(&self.session, &user)
            .await
            .map_err(|err| match err {
                DbError::Duplicate(_) => UserError::EmailTaken,
                other => UserError::Repo(other),
            })?;

        info!(id = %created.id(), "user created");
        Ok(UserOutput::from(&created))
    }

    /// Rename an existing user.
    pub async fn update_user(&self, id: Uuid, name: &str) -> UserResult<UserOutput> {
        if name.is_empty() {
            return Err(UserError::NameRequired);
        }

        let current = self
            .repo
            .get_user(&self.session, id)
            .await
            .map_err(not_found)?;
        let updated = self
            .repo
            .update_user(&self.session, &User::from_source(id, name, current.email()))
            .await
            .map_err(not_found)?;

        info!(id = %updated.id(), "user updated");
        Ok(UserOutput::from(&updated))
    }

    /// Delete a user by id.
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        self.repo.delete_user(&self.session, id).await?;
        info!(%id, "user deleted");
        Ok(())
    }
}

fn not_found(err: DbError) -> UserError {
    match err {
        DbError::NotFound => UserError::NotFound,
        other => UserError::Repo(other),
    }
}
