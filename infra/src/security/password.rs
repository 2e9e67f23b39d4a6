//! bcrypt password hashing

use kg_core::errors::DomainResult;
use kg_core::services::account::PasswordHasher;
use tracing::warn;

use crate::InfrastructureError;

/// bcrypt-backed [`PasswordHasher`]
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl BcryptPasswordHasher {
    /// Hasher with the given work factor (4..=31)
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| InfrastructureError::Hashing(e.to_string()).into())
    }

    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        match bcrypt::verify(password, hash) {
            Ok(matches) => Ok(matches),
            Err(e) => {
                // A corrupt stored hash must not let anyone in
                warn!(error = %e, "Stored password hash could not be parsed");
                Ok(false)
            }
        }
    }
}
