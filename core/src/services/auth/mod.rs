//! Request authentication: token extraction and identity resolution

mod gate;

#[cfg(test)]
mod tests;

pub use gate::{extract_token, AuthGate, BEARER_SCHEME};
