use anyhow::Context;
use argon2::{password_hash::{rand_core::OsRng, SaltString}, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use secrecy::{ExposeSecret, SecretString};

use crate::telemetry::spawn_blocking_with_tracing;

// Hashes a password into the argon2 PHC string format stored in users.password
pub fn compute_password_hash(password: SecretString) -> Result<SecretString, anyhow::Error>{
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
                            .hash_password(password.expose_secret().as_bytes(), &salt)
                            .map_err(|_| anyhow::anyhow!("Failed to compute password hash"))?
                            .to_string();

    Ok(SecretString::from(password_hash))
}

// Checks a candidate password against the stored hash on the blocking pool.
// A stored value that is not a PHC string is an error, not a mismatch.
pub async fn verify_password(candidate: SecretString, stored_hash: String) -> Result<bool, anyhow::Error>{
    spawn_blocking_with_tracing(move || {
        let parsed = PasswordHash::new(&stored_hash)
            .map_err(|_| anyhow::anyhow!("Stored password is not a valid argon2 hash"))?;

        Ok(Argon2::default()
            .verify_password(candidate.expose_secret().as_bytes(), &parsed)
            .is_ok())
    })
    .await
    .context("Failed due to threadpool error")?
}
