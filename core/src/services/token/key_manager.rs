//! RS256 key pairs for JWT signing and verification

use std::fs;
use std::path::{Path, PathBuf};

use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::errors::{DomainError, TokenError};

/// One RS256 key pair. Access and refresh tokens each get their own.
#[derive(Clone)]
pub struct Rs256KeyPair {
    /// Private key for signing JWTs
    encoding_key: EncodingKey,
    /// Public key for verifying JWTs
    decoding_key: DecodingKey,
    /// Where the keys came from, for diagnostics only
    source: PathBuf,
}

impl std::fmt::Debug for Rs256KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rs256KeyPair")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

fn key_load_error(message: String) -> DomainError {
    DomainError::Token(TokenError::KeyLoad { message })
}

impl Rs256KeyPair {
    /// Loads a key pair from PEM files on disk
    ///
    /// # Arguments
    ///
    /// * `private_key_path` - Path to the PEM-encoded private key file
    /// * `public_key_path` - Path to the PEM-encoded public key file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use kg_core::services::token::Rs256KeyPair;
    ///
    /// let keys = Rs256KeyPair::from_files(
    ///     "keys/access_private_key.pem",
    ///     "keys/access_public_key.pem",
    /// )?;
    /// # Ok::<(), kg_core::errors::DomainError>(())
    /// ```
    pub fn from_files<P: AsRef<Path>>(
        private_key_path: P,
        public_key_path: P,
    ) -> Result<Self, DomainError> {
        let private_key_path = private_key_path.as_ref();
        let public_key_path = public_key_path.as_ref();

        let private_key_pem = fs::read(private_key_path).map_err(|e| {
            key_load_error(format!(
                "Failed to read private key {}: {}",
                private_key_path.display(),
                e
            ))
        })?;
        let public_key_pem = fs::read(public_key_path).map_err(|e| {
            key_load_error(format!(
                "Failed to read public key {}: {}",
                public_key_path.display(),
                e
            ))
        })?;

        let mut pair = Self::from_pem_bytes(&private_key_pem, &public_key_pem)?;
        pair.source = private_key_path.to_path_buf();
        Ok(pair)
    }

    /// Creates a key pair from PEM strings (embedded keys or tests)
    pub fn from_pem_strings(
        private_key_pem: &str,
        public_key_pem: &str,
    ) -> Result<Self, DomainError> {
        Self::from_pem_bytes(private_key_pem.as_bytes(), public_key_pem.as_bytes())
    }

    fn from_pem_bytes(private_key_pem: &[u8], public_key_pem: &[u8]) -> Result<Self, DomainError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem)
            .map_err(|e| key_load_error(format!("Invalid private key format: {}", e)))?;

        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem)
            .map_err(|e| key_load_error(format!("Invalid public key format: {}", e)))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            source: PathBuf::from("memory"),
        })
    }

    /// Returns the encoding key for signing JWTs
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Returns the decoding key for verifying JWTs
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}
