//! Password hashing.
//!
//! Uses Argon2id with per-digest random salts. Digests are PHC strings that
//! carry their own parameters, so changing the configured cost does not
//! invalidate existing accounts.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand_core::OsRng;

use crate::config::AuthConfig;
use crate::{MicroblogError, Result};

/// Produces and checks password digests.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
    // Verified against when an account is missing, so sign-in costs the same.
    dummy_digest: String,
}

impl CredentialHasher {
    /// Create a hasher with explicit Argon2 cost parameters.
    ///
    /// * `memory_kib` - memory cost in KiB
    /// * `iterations` - time cost
    /// * `parallelism` - lanes
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| MicroblogError::Config(format!("invalid argon2 parameters: {e}")))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        let dummy_digest = argon2
            .hash_password(uuid::Uuid::new_v4().as_bytes(), &salt)
            .map_err(|e| MicroblogError::Hash(e.to_string()))?
            .to_string();

        Ok(Self {
            argon2,
            dummy_digest,
        })
    }

    /// Create a hasher from the `[auth]` configuration section.
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        Self::new(
            config.argon2_memory_kib,
            config.argon2_iterations,
            config.argon2_parallelism,
        )
    }

    /// Hash a password.
    ///
    /// Returns a PHC-formatted string that includes the salt and parameters.
    pub fn digest(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| MicroblogError::Hash(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// A digest with the configured cost that no password matches.
    pub fn dummy_digest(&self) -> &str {
        &self.dummy_digest
    }

    /// Check a password against a stored digest.
    ///
    /// A missing or malformed digest never matches.
    pub fn verify(&self, password: &str, digest: Option<&str>) -> bool {
        let Some(digest) = digest else {
            return false;
        };
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };

        // Parameters come from the parsed hash
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher").finish()
    }
}

#[cfg(test)]
pub(crate) fn test_hasher() -> CredentialHasher {
    // Cheap parameters so the test suite stays fast
    CredentialHasher::new(8, 1, 1).unwrap()
}
