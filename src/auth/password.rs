use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// One-way argon2 digest in PHC string form.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|digest| digest.to_string())
        .map_err(|e| {
            error!(error = %e, "argon2 hashing failed");
            anyhow::anyhow!("argon2 hash: {e}")
        })
}

/// `Ok(false)` only for a wrong password. An unreadable stored digest, or one
/// argon2 cannot check, is an error rather than a silent mismatch.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let digest = PasswordHash::new(stored)
        .map_err(|e| anyhow::anyhow!("stored password digest unreadable: {e}"))?;

    match Argon2::default().verify_password(plain.as_bytes(), &digest) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => {
            error!(error = %e, algorithm = %digest.algorithm, "argon2 verify failed");
            Err(anyhow::anyhow!("argon2 verify: {e}"))
        }
    }
}
