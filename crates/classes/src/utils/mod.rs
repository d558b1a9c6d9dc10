//! Internal utilities for the class workflows.

pub mod class_code;
pub mod error_message;
pub mod validation;

pub use class_code::{generate_class_code, CLASS_CODE_LENGTH, MAX_CODE_ATTEMPTS};
pub use error_message::{error_message, value_message};
pub use validation::{parse_time, Validator};
