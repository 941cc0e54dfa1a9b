use argon2::{
    password_hash::{phc::PasswordHash, PasswordHasher, PasswordVerifier},
    Argon2,
};

use crate::error::{AppError, AppResult};

/// Hashes a password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> AppResult<String> {
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes())
        .map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("failed to hash password: {}", e),
        })?
        .to_string();

    Ok(password_hash)
}

/// Verifies a password against a stored PHC-format hash.
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash).map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("stored password hash is malformed: {}", e),
    })?;
    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_password_produces_argon2_phc_string() {
        let hash = hash_password("kimchi-stew-4ever").expect("Failed to hash password");

        assert!(!hash.is_empty());
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn verify_password_accepts_the_right_password() {
        let hash = hash_password("kimchi-stew-4ever").expect("Failed to hash password");
        assert!(verify_password("kimchi-stew-4ever", &hash).unwrap());
    }

    #[test]
    fn verify_password_rejects_the_wrong_password() {
        let hash = hash_password("kimchi-stew-4ever").expect("Failed to hash password");
        assert!(!verify_password("doenjang-stew", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently_per_salt() {
        let hash1 = hash_password("kimchi-stew-4ever").unwrap();
        let hash2 = hash_password("kimchi-stew-4ever").unwrap();

        assert_ne!(hash1, hash2);
        assert!(verify_password("kimchi-stew-4ever", &hash1).unwrap());
        assert!(verify_password("kimchi-stew-4ever", &hash2).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_internal_error() {
        let err = verify_password("anything", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }
}
