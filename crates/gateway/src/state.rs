//! Shared application state for the gateway.

use std::sync::Arc;

use groundwork_database::{AnyPool, Session, UserRepository};
use groundwork_users::UserService;

/// Shared state wiring repositories into services for the handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<UserRepository>>,
}

impl AppState {
    pub fn new(pool: AnyPool) -> Self {
        let session = Session::from_pool(pool);
        let user_service = Arc::new(UserService::new(UserRepository::new(), session));

        Self { user_service }
    }
}
