//! Password hashing with a legacy compatibility shim.
//!
//! New and updated passwords are stored as bcrypt hashes. Databases migrated
//! from earlier installs may still hold plaintext passwords for pre-seeded
//! demo accounts; those are detected by hash shape (bcrypt strings start with
//! `$2`) and compared by exact string equality instead. The shim is a
//! deliberate compatibility concession, not a security feature.

/// Error type for password operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),
}

/// Returns true when the stored value has the bcrypt hash shape.
pub fn is_hashed(stored: &str) -> bool {
    stored.starts_with("$2")
}

/// Hashes a password with bcrypt at the default cost factor.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a candidate password against a stored credential.
///
/// Hashed credentials go through bcrypt verification; anything else falls
/// back to exact string equality (legacy plaintext rows).
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    if is_hashed(stored) {
        bcrypt::verify(password, stored).map_err(|e| PasswordError::VerifyError(e.to_string()))
    } else {
        Ok(password == stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("flock-and-field").unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("flock-and-field", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_legacy_plaintext_exact_equality() {
        assert!(verify_password("admin123", "admin123").unwrap());
        assert!(!verify_password("admin1234", "admin123").unwrap());
        // A legacy row never matches via bcrypt rules, only equality.
        assert!(!verify_password("ADMIN123", "admin123").unwrap());
    }

    #[test]
    fn test_hash_shape_detection() {
        assert!(is_hashed("$2b$12$abcdefghijklmnopqrstuv"));
        assert!(!is_hashed("admin123"));
        assert!(!is_hashed(""));
    }
}
