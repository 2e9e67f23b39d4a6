//! Token codec module for JWT management
//!
//! This module handles the stateless half of the session lifecycle:
//! - RS256 key loading for asymmetric signing
//! - Access and refresh token issuance
//! - Signature, algorithm and expiry verification
//!
//! Nothing here touches the session store.

mod codec;
mod key_manager;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use key_manager::Rs256KeyPair;
