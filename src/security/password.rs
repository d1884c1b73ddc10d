use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, Version,
};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use thiserror::Error;

// Argon2id, 19 MiB / 2 passes / 1 lane. Cost is a parameter, salt is
// generated per hash and embedded in the PHC string.
static HASHER: Lazy<Argon2<'static>> = Lazy::new(|| {
    let params = Params::new(19 * 1024, 2, 1, None).expect("argon2 params");
    Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params)
});

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("hash error: {0}")]
    Hash(String),
}

pub fn hash(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    HASHER
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Constant-time comparison is handled by the argon2 verifier itself.
pub fn verify(plain: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(|e| PasswordError::Hash(e.to_string()))?;
    Ok(HASHER.verify_password(plain.as_bytes(), &parsed).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hashed = hash("otters-are-lovely").unwrap();
        assert_ne!(hashed, "otters-are-lovely");
        assert!(verify("otters-are-lovely", &hashed).unwrap());
        assert!(!verify("otters-are-lonely", &hashed).unwrap());
    }

    #[test]
    fn garbage_stored_hash_is_an_error() {
        assert!(verify("anything", "not-a-phc-string").is_err());
    }
}
