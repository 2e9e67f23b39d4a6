//! Domain layer containing the session lifecycle entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
