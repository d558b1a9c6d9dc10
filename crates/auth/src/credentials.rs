//! Email normalisation and password hashing for the `password` identity
//! provider.

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;

use crate::errors::{AuthError, AuthResult};

pub const PASSWORD_PROVIDER: &str = "password";
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Trim and lower-case an email, rejecting anything that does not look like
/// `local@domain.tld`.
pub fn normalize_email(email: &str) -> AuthResult<String> {
    let email = email.trim().to_lowercase();

    let Some((local, domain)) = email.split_once('@') else {
        return Err(AuthError::InvalidEmail);
    };

    let well_formed = !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .rsplit_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty());

    if well_formed {
        Ok(email)
    } else {
        Err(AuthError::InvalidEmail)
    }
}

pub fn ensure_password_strength(password: &str) -> AuthResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword);
    }
    Ok(())
}

/// Salted argon2 hash in PHC string form.
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Any mismatch, including a missing or unparsable stored hash, reads as bad
/// credentials so callers cannot tell which part was wrong.
pub fn verify_password(password: &str, stored: Option<&str>) -> AuthResult<()> {
    let stored = stored.ok_or(AuthError::InvalidCredentials)?;
    let parsed = PasswordHash::new(stored).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}
