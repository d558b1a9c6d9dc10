//! Error types for the class workflows.

use thiserror::Error;
use tutorhub_database::DatabaseError;

pub type ClassResult<T> = Result<T, ClassError>;

/// Every workflow failure is terminal for the request that triggered it.
#[derive(Debug, Error)]
pub enum ClassError {
    #[error("{message}")]
    NotFound { message: String },

    /// A precondition failed before any write was issued.
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    PermissionDenied { message: String },

    /// The membership already exists; carries the friendly message.
    #[error("{message}")]
    AlreadyJoined { message: String },

    /// The store rejected the call; displays the store's raw message.
    #[error("{0}")]
    Store(#[from] DatabaseError),

    /// An earlier step committed and a later one did not.
    #[error("Workspace \"{workspace_name}\" was created but updating the profile failed: {cause}")]
    PartialFailure {
        workspace_name: String,
        cause: String,
        compensated: bool,
    },
}

impl ClassError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    pub fn already_joined(message: impl Into<String>) -> Self {
        Self::AlreadyJoined {
            message: message.into(),
        }
    }

    /// True when the store rejected a write on a constraint.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Self::AlreadyJoined { .. } => true,
            Self::Store(error) => error.is_constraint(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_display_the_raw_message() {
        let error = ClassError::from(DatabaseError::ForeignKeyViolation(
            "FOREIGN KEY constraint failed".into(),
        ));
        assert_eq!(error.to_string(), "FOREIGN KEY constraint failed");
        assert!(error.is_constraint_violation());
    }

    #[test]
    fn partial_failure_names_the_workspace() {
        let error = ClassError::PartialFailure {
            workspace_name: "Kanji Club".into(),
            cause: "database is locked".into(),
            compensated: true,
        };
        let message = error.to_string();
        assert!(message.contains("Kanji Club"));
        assert!(message.contains("database is locked"));
        assert!(!error.is_constraint_violation());
    }
}
