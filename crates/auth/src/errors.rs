use thiserror::Error;

/// Failures surfaced by sign-up, sign-in and bearer token resolution.
///
/// The first four variants carry the exact wording shown to users.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unable to validate email address: invalid format")]
    InvalidEmail,
    #[error("Password should be at least 6 characters")]
    WeakPassword,
    #[error("User already registered")]
    UserExists,
    #[error("Invalid login credentials")]
    InvalidCredentials,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),
    #[error("session not found")]
    SessionNotFound,
    #[error("session expired")]
    SessionExpired,
    #[error("invalid session token")]
    InvalidSession,
}

impl AuthError {
    /// Errors caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::PasswordHash(_))
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
