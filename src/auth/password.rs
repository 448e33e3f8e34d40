use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::{error, warn};

/// Argon2 hash with a fresh random salt. Two calls with the same input
/// produce different strings; always go through [`verify_password`].
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Fails closed: a stored hash that does not parse rejects the login
/// instead of surfacing an error to the caller.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "malformed password hash in store");
            return false;
        }
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn same_password_hashes_to_distinct_strings() {
        let first = hash_password("hunter2hunter2").expect("hashing should succeed");
        let second = hash_password("hunter2hunter2").expect("hashing should succeed");
        assert_ne!(first, second);
        assert!(verify_password("hunter2hunter2", &first));
        assert!(verify_password("hunter2hunter2", &second));
    }

    #[test]
    fn hash_never_contains_plaintext() {
        let hash = hash_password("plaintext-password").expect("hashing should succeed");
        assert!(!hash.contains("plaintext-password"));
    }

    #[test]
    fn verify_fails_closed_on_malformed_hash() {
        assert!(!verify_password("anything", "not-a-valid-hash"));
        assert!(!verify_password("anything", ""));
    }
}
