//! Shared types and result types for the database layer

pub mod errors;

use chrono::{DateTime, SecondsFormat, Utc};

pub use errors::{classify_message, DatabaseError};

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Render a timestamp the way every table stores it: RFC 3339 in UTC with
/// millisecond precision, so lexical and chronological order agree.
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}
