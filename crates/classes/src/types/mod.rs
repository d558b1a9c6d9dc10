//! Shared types for the class workflows.

pub mod errors;
pub mod messages;

use serde::{Deserialize, Serialize};
use tutorhub_database::{Class, ClassSession, MemberRole, Workspace};

pub use errors::{ClassError, ClassResult};

/// The authenticated user a workflow runs on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub user_id: i64,
    pub email: String,
}

impl Caller {
    pub fn new(user_id: i64, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}

/// Decides whether an accepted role change goes ahead.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// A class as shown on its detail page, plus the caller's cached role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDetail {
    pub class: Class,
    pub sessions: Vec<ClassSession>,
    pub my_role: Option<MemberRole>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SessionDraft {
    pub title: String,
    pub start_at: String,
    pub end_at: String,
    #[serde(default)]
    pub request_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionOutcome {
    pub session: ClassSession,
    pub replayed: bool,
    pub message: String,
    /// Set when the session was stored but the follow-up list reload failed.
    pub sessions_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinOutcome {
    pub class: Class,
    pub role: MemberRole,
    pub message: String,
    /// The client returns to the directory after this delay.
    pub redirect_after_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TutorForm {
    pub bio: String,
    pub subjects: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub payment_detail: String,
}

/// Tutor upgrade gate: class creation stays blocked until `is_tutor`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TutorGate {
    pub is_tutor: bool,
    pub form: TutorForm,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewClassForm {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassCreated {
    pub class: Class,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnboardingOutcome {
    pub workspace: Workspace,
    pub message: String,
}
