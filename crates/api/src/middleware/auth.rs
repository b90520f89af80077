//! # Authentication Module
//!
//! Password hashing and verification for user accounts, using Argon2.
//! There is no session machinery here; login is a credential check that
//! returns the user profile.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use eyre::Result;

use salonbook_core::errors::{SalonError, SalonResult};

/// Hashes a password using the Argon2 algorithm.
///
/// Generates a random salt per password and returns the hash in PHC
/// string format (algorithm, version, parameters, salt, and hash).
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    // Create default Argon2 instance
    let argon2 = Argon2::default();

    // Hash the password with salt
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a password against a stored PHC-format hash.
pub fn verify_password(password: &str, password_hash: &str) -> SalonResult<bool> {
    let parsed_hash = argon2::PasswordHash::new(password_hash)
        .map_err(|e| SalonError::Internal(format!("Invalid password hash: {}", e).into()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
