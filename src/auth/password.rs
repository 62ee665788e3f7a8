use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Argon2id with 19MB memory, 2 iterations, parallelism 1.
fn hasher() -> Result<Argon2<'static>, String> {
    let params = Params::new(19 * 1024, 2, 1, None).map_err(|e| format!("Invalid params: {e}"))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Reject passwords too weak to store.
pub fn check_strength(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    Ok(())
}

/// Produce a salted PHC hash string for storage.
pub fn hash(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| format!("Hashing failed: {e}"))
}

/// Parameters are read back from the PHC string, so hashes made with older
/// settings keep verifying.
pub fn verify(password: &str, stored: &str) -> Result<bool, String> {
    let parsed = PasswordHash::new(stored).map_err(|e| format!("Invalid hash: {e}"))?;
    Ok(hasher()?
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    #[test]
    fn hash_is_salted_and_verifiable() {
        let first = super::hash("correct horse").unwrap();
        let second = super::hash("correct horse").unwrap();

        assert_ne!(first, second);
        assert!(!first.contains("correct horse"));
        assert!(super::verify("correct horse", &first).unwrap());
        assert!(!super::verify("battery staple", &first).unwrap());
    }

    #[test]
    fn verify_reports_malformed_hash() {
        assert!(super::verify("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn short_passwords_are_rejected() {
        assert!(super::check_strength("short").is_err());
        assert!(super::check_strength("long enough").is_ok());
    }
}
