//! Class membership entity definitions

use serde::{Deserialize, Serialize};
use std::fmt;

use super::class::Class;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMember {
    pub id: i64,
    pub class_id: i64,
    pub user_id: i64,
    pub role: MemberRole,
    pub joined_at: String,
}

/// A membership row of the class directory. The class is absent when the
/// join did not resolve (e.g. the class row is gone).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipWithClass {
    pub class_id: i64,
    pub role: MemberRole,
    pub joined_at: String,
    pub class: Option<Class>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Tutor,
    Student,
    Parent,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Tutor => "tutor",
            MemberRole::Student => "student",
            MemberRole::Parent => "parent",
        }
    }

    /// Roles a member may pick for themselves.
    pub fn is_selectable(&self) -> bool {
        matches!(self, MemberRole::Student | MemberRole::Parent)
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "tutor" => Some(MemberRole::Tutor),
            "student" => Some(MemberRole::Student),
            "parent" => Some(MemberRole::Parent),
            _ => None,
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
