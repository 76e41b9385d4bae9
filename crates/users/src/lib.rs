//! User usecases for Groundwork.
//!
//! Validates input, hashes passwords and delegates persistence to the
//! injected repository. Persistence failures come back as typed errors
//! and are classified into user-facing categories at the HTTP boundary,
//! not here.

pub mod services;
pub mod types;
pub mod utils;

pub use services::UserService;
pub use types::errors::{UserError, UserResult};
pub use types::requests::CreateUserInput;
pub use types::responses::UserOutput;
