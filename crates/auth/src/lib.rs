//! `agrimarket-auth` — mock identity boundary.
//!
//! Identity only gates what callers present; it never feeds catalog queries.
//! This crate is intentionally decoupled from transport and storage.

pub mod provider;
pub mod roles;
pub mod session;
pub mod user;

pub use provider::{AuthError, AuthProvider, Credentials, MockAuthProvider, ADMIN_EMAIL};
pub use roles::Role;
pub use session::Session;
pub use user::{Registration, User};
