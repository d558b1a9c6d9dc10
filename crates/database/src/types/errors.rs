//! Error types for the database layer

use thiserror::Error;

/// General database error.
///
/// Store failures keep the raw message reported by SQLite so callers can
/// surface it unchanged; the variant carries the classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),

    #[error("{0}")]
    QueryError(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    ForeignKeyViolation(String),

    #[error("{0}")]
    ConstraintViolation(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DatabaseError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, DatabaseError::Duplicate(_))
    }

    pub fn is_constraint(&self) -> bool {
        matches!(
            self,
            DatabaseError::Duplicate(_)
                | DatabaseError::ForeignKeyViolation(_)
                | DatabaseError::ConstraintViolation(_)
        )
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("row not found".to_string()),
            sqlx::Error::Database(db) => {
                let message = db.message().to_string();
                match db.kind() {
                    sqlx::error::ErrorKind::UniqueViolation => DatabaseError::Duplicate(message),
                    sqlx::error::ErrorKind::ForeignKeyViolation => {
                        DatabaseError::ForeignKeyViolation(message)
                    }
                    sqlx::error::ErrorKind::NotNullViolation
                    | sqlx::error::ErrorKind::CheckViolation => {
                        DatabaseError::ConstraintViolation(message)
                    }
                    _ => classify_message(message),
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                DatabaseError::ConnectionError(error.to_string())
            }
            sqlx::Error::Migrate(err) => DatabaseError::MigrationError(err.to_string()),
            other => DatabaseError::QueryError(other.to_string()),
        }
    }
}

/// Fallback classification for driver errors that arrive without a
/// structured kind. This is the only place that inspects message text.
pub fn classify_message(message: impl Into<String>) -> DatabaseError {
    let message = message.into();
    let lowered = message.to_ascii_lowercase();

    if lowered.contains("duplicate") || lowered.contains("unique") {
        DatabaseError::Duplicate(message)
    } else if lowered.contains("foreign key") {
        DatabaseError::ForeignKeyViolation(message)
    } else if lowered.contains("constraint") {
        DatabaseError::ConstraintViolation(message)
    } else {
        DatabaseError::QueryError(message)
    }
}
