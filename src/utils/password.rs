use crate::error::AppResult;
use argon2::{
    Argon2,
    password_hash::{PasswordHasher, PasswordVerifier, phc::PasswordHash},
};

/// Hash a repo passphrase using Argon2id.
///
/// Each call salts independently, so hashing the same passphrase twice
/// yields different PHC strings that both verify.
pub fn hash_passphrase(passphrase: &str) -> AppResult<String> {
    let argon2 = Argon2::default();

    let passphrase_hash = argon2.hash_password(passphrase.as_bytes())?.to_string();

    Ok(passphrase_hash)
}

/// Verify a plaintext passphrase against a stored PHC hash.
///
/// Returns `Ok(false)` on mismatch; errors only when the stored hash
/// itself cannot be parsed.
pub fn verify_passphrase(passphrase: &str, passphrase_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(passphrase_hash)?;
    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(passphrase.as_bytes(), &parsed_hash)
        .is_ok())
}
