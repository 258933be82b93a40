use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Argon2id keyed with a process-wide pepper taken from configuration
/// at startup. Each hash additionally gets its own random salt, so the
/// stored digest is a self-describing PHC string.
pub struct PasswordHasher {
    pepper: Vec<u8>,
}

impl PasswordHasher {
    /// Create a new password hasher keyed with the given pepper.
    ///
    /// # Arguments
    /// * `pepper` - Process-wide secret material from configuration
    ///
    /// # Errors
    /// * `InvalidPepper` - Pepper is empty or rejected by Argon2 (startup
    ///   failure; callers should treat this as fatal)
    pub fn new(pepper: &str) -> Result<Self, PasswordError> {
        if pepper.is_empty() {
            return Err(PasswordError::InvalidPepper(
                "pepper must not be empty".to_string(),
            ));
        }

        let pepper = pepper.as_bytes().to_vec();

        // Validate the material once so hash/verify cannot fail on it later.
        Argon2::new_with_secret(
            &pepper,
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| PasswordError::InvalidPepper(e.to_string()))?;

        Ok(Self { pepper })
    }

    fn argon2(&self) -> Result<Argon2<'_>, PasswordError> {
        Argon2::new_with_secret(
            &self.pepper,
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with random salt generation plus the process-wide pepper.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Runs in constant time relative to the candidate's correctness.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Hash format is invalid
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(self
            .argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
