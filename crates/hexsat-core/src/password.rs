use anyhow::anyhow;
use bcrypt::{DEFAULT_COST, non_truncating_hash, non_truncating_verify};

use crate::errors::AppError;

/// bcrypt only reads the first 72 bytes of its input. Longer passwords are
/// refused here instead of being silently cut.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    non_truncating_hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    non_truncating_verify(password, hash)
        .map_err(|e| AppError::internal(anyhow!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("secret").unwrap();
        assert_ne!(hashed, "secret");
        assert!(verify_password("secret", &hashed).unwrap());
        assert!(!verify_password("other", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("secret").unwrap();
        let second = hash_password("secret").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_passwords_longer_than_72_bytes_are_refused() {
        let long = "p".repeat(100);
        assert!(hash_password(&long).is_err());

        let hashed = hash_password(&"p".repeat(72)).unwrap();
        let differs_after_72 = format!("{}DIFFERENT", "p".repeat(72));
        assert!(verify_password(&differs_after_72, &hashed).is_err());
        assert!(verify_password(&"p".repeat(72), &hashed).unwrap());
    }

    #[test]
    fn test_verify_against_garbage_hash_fails() {
        assert!(verify_password("secret", "not-a-bcrypt-hash").is_err());
    }
}
