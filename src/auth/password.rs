use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

// Fixed cost for every stored credential.
const MEMORY_KIB: u32 = 19 * 1024;
const ITERATIONS: u32 = 2;
const PARALLELISM: u32 = 1;

fn argon2() -> Result<Argon2<'static>, String> {
    let params = Params::new(MEMORY_KIB, ITERATIONS, PARALLELISM, None)
        .map_err(|e| format!("Invalid argon2 params: {e}"))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Produce a salted Argon2id PHC string for `plaintext`.
///
/// Business rules (empty or short passwords) are the caller's job.
pub fn hash(plaintext: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    argon2()?
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| format!("Hashing failed: {e}"))
}

/// Check `plaintext` against a stored PHC string.
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
pub fn verify(plaintext: &str, stored: &str) -> Result<bool, String> {
    let parsed = PasswordHash::new(stored).map_err(|e| format!("Invalid stored hash: {e}"))?;
    Ok(argon2()?
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok())
}
