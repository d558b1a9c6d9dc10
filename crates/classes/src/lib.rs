//! # TutorHub Classes Crate
//!
//! The class workflows: directory, join-by-code, class detail with role
//! changes and session scheduling, the tutor upgrade gate, onboarding and
//! class creation.
//!
//! ## Architecture
//!
//! - **Repositories**: the `ClassroomStore` trait and its SQLite implementation
//! - **Services**: one method per user action
//! - **Types**: workflow inputs, outcomes, errors and user-facing messages
//! - **Utils**: validation, class codes and error message normalization
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tutorhub_classes::{Caller, ClassService, SqliteClassroomStore};
//! use tutorhub_config::WorkflowConfig;
//!
//! # async fn example(pool: sqlx::SqlitePool) -> Result<(), tutorhub_classes::ClassError> {
//! let service = ClassService::new(SqliteClassroomStore::new(pool), WorkflowConfig::default());
//! let classes = service.directory(&Caller::new(1, "learner@example.com")).await?;
//! # Ok(())
//! # }
//! ```

pub mod repositories;
pub mod services;
pub mod types;
pub mod utils;

pub use repositories::{ClassroomStore, SqliteClassroomStore};
pub use services::{ClassDetailService, ClassService, TutorService};
pub use types::{
    messages, Caller, ClassCreated, ClassDetail, ClassError, ClassResult, Confirm, JoinOutcome,
    NewClassForm, OnboardingOutcome, SessionDraft, SessionOutcome, TutorForm, TutorGate,
};
pub use utils::{error_message, value_message};
