//! Input validation for the class workflows.
//!
//! Each check returns the exact message shown to the user and runs before
//! any store call is made.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use tutorhub_database::MemberRole;

use crate::types::{messages, ClassError, ClassResult};

/// Measured in UTF-16 code units, the length browsers report for the field.
const MIN_BIO_UNITS: usize = 20;
const LOCAL_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

pub struct Validator;

impl Validator {
    /// Trim and upper-case a human-entered class code.
    pub fn class_code(raw: &str) -> ClassResult<String> {
        let code = raw.trim().to_uppercase();
        if code.is_empty() {
            return Err(ClassError::validation(messages::MISSING_CLASS_CODE));
        }
        Ok(code)
    }

    /// Only student and parent may be picked by a member.
    pub fn selectable_role(role: MemberRole) -> ClassResult<MemberRole> {
        if role.is_selectable() {
            Ok(role)
        } else {
            Err(ClassError::validation(messages::ROLE_NOT_SELECTABLE))
        }
    }

    pub fn session_title(raw: &str) -> ClassResult<String> {
        non_empty(raw, messages::MISSING_SESSION_TITLE)
    }

    /// Parse both bounds and require `end > start`.
    pub fn session_window(start: &str, end: &str) -> ClassResult<(DateTime<Utc>, DateTime<Utc>)> {
        let (Some(start), Some(end)) = (parse_time(start), parse_time(end)) else {
            return Err(ClassError::validation(messages::INVALID_SESSION_TIME));
        };

        if end <= start {
            return Err(ClassError::validation(messages::END_BEFORE_START));
        }

        Ok((start, end))
    }

    pub fn tutor_bio(raw: &str) -> ClassResult<String> {
        let bio = raw.trim();
        if bio.encode_utf16().count() < MIN_BIO_UNITS {
            return Err(ClassError::validation(messages::BIO_TOO_SHORT));
        }
        Ok(bio.to_string())
    }

    pub fn tutor_subjects(raw: &str) -> ClassResult<String> {
        non_empty(raw, messages::MISSING_SUBJECTS)
    }

    pub fn class_name(raw: &str) -> ClassResult<String> {
        non_empty(raw, messages::MISSING_CLASS_NAME)
    }

    pub fn workspace_name(raw: &str) -> ClassResult<String> {
        non_empty(raw, messages::MISSING_WORKSPACE_NAME)
    }

    /// Trimmed optional text; blank becomes `None`.
    pub fn optional_text(raw: Option<&str>) -> Option<String> {
        raw.map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }
}

fn non_empty(raw: &str, message: &str) -> ClassResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ClassError::validation(message));
    }
    Ok(value.to_string())
}

/// RFC 3339, or a zone-less `YYYY-MM-DDTHH:MM[:SS]` read as UTC.
///
/// Truncated to milliseconds, the precision timestamps are stored with, so a
/// window that validates here also satisfies `end_at > start_at` in SQLite.
pub fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let parsed = match DateTime::parse_from_rfc3339(raw) {
        Ok(value) => Some(value.with_timezone(&Utc)),
        Err(_) => LOCAL_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| naive.and_utc()),
    };

    parsed.map(|value| value.trunc_subsecs(3))
}
