//! Class entity definitions

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub id: i64,
    pub public_id: String,
    pub name: String,
    pub description: Option<String>,
    pub class_code: String,
    pub workspace_id: Option<i64>,
    pub created_by: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub description: Option<String>,
    pub class_code: String,
    pub workspace_id: Option<i64>,
    pub created_by: i64,
}
