//! Profile and workspace entity definitions

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: i64,
    pub is_tutor: bool,
    pub tutor_bio: Option<String>,
    pub tutor_subjects: Option<String>,
    pub tutor_payment_method: Option<String>,
    pub tutor_payment_detail: Option<String>,
    pub default_workspace_id: Option<i64>,
}

/// Fields written when a profile is upgraded to tutor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TutorDetails {
    pub bio: String,
    pub subjects: String,
    pub payment_method: Option<String>,
    pub payment_detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: i64,
    pub public_id: String,
    pub owner_user_id: i64,
    pub name: String,
    pub created_at: String,
}
