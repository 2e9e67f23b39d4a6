use crate::errors::DomainResult;

/// One-way password hashing capability.
///
/// Implementations are synchronous and may be CPU heavy; the account service
/// runs them on the blocking pool.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> DomainResult<String>;

    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool>;
}
