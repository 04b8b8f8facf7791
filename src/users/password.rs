use argon2::password_hash::{PasswordHasher, SaltString};
use rand::rngs::OsRng;

use crate::config::HashingConfig;

/// Callers log failures; this only reports them.
pub fn hash_password(plain: &str, cfg: &HashingConfig) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = cfg.argon2()?;
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// Cost parameters are read back from the PHC string.
#[cfg(test)]
pub(crate) fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    use argon2::{
        password_hash::{PasswordHash, PasswordVerifier},
        Argon2,
    };

    let parsed = PasswordHash::new(hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
pub(crate) fn cheap_params() -> HashingConfig {
    HashingConfig {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    }
}
