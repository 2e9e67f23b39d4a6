//! Account use cases built on the session manager
//!
//! Registration, credential login, refresh with a user check, and logout.

mod password;
mod service;
mod types;


pub use password::PasswordHasher;
pub use service::AccountService;
pub use types::{LoginInput, LoginOutcome, RegisterInput};
