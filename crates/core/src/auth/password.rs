//! Salted password hashing with Argon2id.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Errors raised while hashing a credential.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The hasher rejected its input.
    #[error("failed to hash credential: {0}")]
    Hash(String),
}

/// Hash a plaintext password with a fresh random salt.
///
/// ```
/// use escola_core::auth::hash_password;
///
/// let hash = hash_password("s3cret").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CredentialError::Hash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordHash, PasswordVerifier};

    fn matches(password: &str, stored: &str) -> bool {
        let parsed = PasswordHash::new(stored).expect("PHC string");
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hash_password("professor123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("professor123"));
    }

    #[test]
    fn test_salts_differ() {
        let first = hash_password("same").unwrap();
        let second = hash_password("same").unwrap();
        assert_ne!(first, second);
        assert!(matches("same", &first));
        assert!(matches("same", &second));
    }

    #[test]
    fn test_wrong_password() {
        let hash = hash_password("right").unwrap();
        assert!(!matches("wrong", &hash));
    }
}
