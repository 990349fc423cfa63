//! Salted one-way hashing of account credentials.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::config::SecurityConfig;
use crate::error::RecordError;

pub trait CredentialHasher: Send + Sync {
    /// Hashes `secret` with a fresh salt and returns the encoded hash string.
    fn hash(&self, secret: &[u8]) -> Result<String, RecordError>;

    /// Checks `secret` against a hash produced by [`CredentialHasher::hash`].
    ///
    /// # Errors
    ///
    /// Only a malformed `hash` is an error. A wrong secret is `Ok(false)`.
    fn verify(&self, hash: &str, secret: &[u8]) -> Result<bool, RecordError>;
}

/// Argon2id hasher producing PHC strings.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new(config: &SecurityConfig) -> anyhow::Result<Self> {
        let params = Params::new(
            config.argon2_memory_cost_kib,
            config.argon2_time_cost,
            config.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, secret: &[u8]) -> Result<String, RecordError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(secret, &salt)
            .map_err(|e| RecordError::Internal(format!("Failed to hash credential: {e}")))?;

        Ok(hash.to_string())
    }

    fn verify(&self, hash: &str, secret: &[u8]) -> Result<bool, RecordError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| RecordError::Internal(format!("Invalid credential hash format: {e}")))?;

        // Cost params come from the PHC string, not from `self`.
        Ok(Argon2::default().verify_password(secret, &parsed).is_ok())
    }
}

#[cfg(test)]
pub(crate) fn fast_hasher() -> Argon2Hasher {
    let config = SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    };
    Argon2Hasher::new(&config).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let hash = hasher.hash(b"correct horse").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify(&hash, b"correct horse").unwrap());
        assert!(!hasher.verify(&hash, b"battery staple").unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = fast_hasher();
        let first = hasher.hash(b"same").unwrap();
        let second = hasher.hash(b"same").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        let hasher = fast_hasher();
        assert!(hasher.verify("not-a-phc-string", b"x").is_err());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let config = SecurityConfig {
            argon2_memory_cost_kib: 1,
            argon2_time_cost: 0,
            argon2_parallelism: 1,
        };
        assert!(Argon2Hasher::new(&config).is_err());
    }
}
