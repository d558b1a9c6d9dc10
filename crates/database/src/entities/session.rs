//! Scheduled class session entity definitions

use serde::{Deserialize, Serialize};

pub const SESSION_STATUS_SCHEDULED: &str = "scheduled";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSession {
    pub id: i64,
    pub public_id: String,
    pub class_id: i64,
    pub title: String,
    pub note: Option<String>,
    pub start_at: String,
    pub end_at: String,
    pub status: String,
    pub created_by: i64,
    pub request_token: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateClassSessionRequest {
    pub class_id: i64,
    pub title: String,
    pub start_at: String,
    pub end_at: String,
    pub created_by: i64,
    pub request_token: Option<String>,
}
