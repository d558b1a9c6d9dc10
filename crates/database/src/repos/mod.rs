//! Database repository implementations

pub mod class_repository;
pub mod member_repository;
pub mod profile_repository;
pub mod session_repository;

pub use class_repository::ClassRepository;
pub use member_repository::MemberRepository;
pub use profile_repository::{ProfileRepository, WorkspaceRepository};
pub use session_repository::ClassSessionRepository;
