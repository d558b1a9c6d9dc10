//! Workflow services. Each public method is one user action: it validates
//! its input, then issues its store calls in sequence.

pub mod class_service;
pub mod detail_service;
pub mod tutor_service;

pub use class_service::ClassService;
pub use detail_service::ClassDetailService;
pub use tutor_service::TutorService;
