//! User-facing messages shared by the workflows and their callers.

pub const NOT_JOINED: &str = "You have not joined this class.";
pub const TUTOR_ROLE_LOCKED: &str = "Tutors cannot change their role here.";
pub const ROLE_NOT_SELECTABLE: &str = "Only the student and parent roles can be chosen.";

pub const ONLY_TUTORS_CREATE_SESSIONS: &str = "Only tutors can create sessions.";
pub const INVALID_SESSION_TIME: &str = "Start/end time is invalid.";
pub const END_BEFORE_START: &str = "End time must be after start time.";
pub const MISSING_SESSION_TITLE: &str = "Enter a session title.";
pub const SESSION_CREATED: &str = "Session created.";
pub const SESSION_REPLAYED: &str = "Session already created.";
pub const REQUEST_ALREADY_SUBMITTED: &str = "This request was already submitted.";

pub const MISSING_CLASS_CODE: &str = "Enter a class code.";
pub const CLASS_CODE_NOT_FOUND: &str = "No class found with this code.";
pub const ALREADY_JOINED: &str =
    "You have already joined this class. If you picked the wrong role, change it from the class page.";

pub const CLASS_NOT_FOUND: &str = "Class not found.";
pub const PROFILE_NOT_FOUND: &str = "Profile not found.";

pub const BIO_TOO_SHORT: &str = "Bio is too short. Write at least 20 characters.";
pub const MISSING_SUBJECTS: &str = "Enter the subjects you teach.";
pub const NOW_A_TUTOR: &str = "You are now a tutor.";
pub const UPGRADE_REQUIRED: &str = "Upgrade to tutor before creating a class.";

pub const MISSING_CLASS_NAME: &str = "Enter a class name.";
pub const CLASS_CODE_EXHAUSTED: &str = "Could not generate a unique class code. Try again.";

pub const MISSING_WORKSPACE_NAME: &str = "Enter a workspace name.";
pub const DEFAULT_WORKSPACE_NAME: &str = "My Tutor Workspace";

pub const DEFAULT_TUTOR_SUBJECTS: &str = "JLPT N3 Grammar";
pub const DEFAULT_PAYMENT_METHOD: &str = "Bank / Momo / Paypal";

pub fn role_changed(role: impl std::fmt::Display) -> String {
    format!("Role changed to \"{role}\".")
}

pub fn joined(class_name: &str, role: impl std::fmt::Display) -> String {
    format!("Joined {class_name} (role: {role}).")
}

pub fn workspace_created(name: &str) -> String {
    format!("You are now a tutor! Workspace created: {name}")
}

pub fn class_created(name: &str, code: &str) -> String {
    format!("Class {name} created. Share the code {code} with your students.")
}

pub fn confirm_role_change(role: impl std::fmt::Display) -> String {
    format!("Change your role in this class to \"{role}\"?")
}
