//! Password accounts and bearer sessions for TutorHub.
//!
//! Sign-up creates the user together with its `password` identity and an
//! empty profile. Sign-in issues an opaque token that the API resolves back
//! to a [`User`] on every request.

mod authenticator;
pub mod credentials;
mod errors;
pub mod tokens;

pub use authenticator::{AuthSession, Authenticator, User};
pub use errors::{AuthError, AuthResult};
