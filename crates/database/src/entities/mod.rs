//! Domain entities for the database layer

pub mod class;
pub mod member;
pub mod profile;
pub mod session;

pub use class::{Class, CreateClassRequest};
pub use member::{ClassMember, MemberRole, MembershipWithClass};
pub use profile::{Profile, TutorDetails, Workspace};
pub use session::{ClassSession, CreateClassSessionRequest, SESSION_STATUS_SCHEDULED};
