//! Authentication capability and its in-memory mock.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use thiserror::Error;

use agrimarket_core::{DomainError, UserId};

use crate::{Registration, Role, Session, User};

/// Address that the mock provider treats as the administrator.
pub const ADMIN_EMAIL: &str = "admin@agri.com";

const MOCK_LOCATION: &str = "Punjab, India";
const MOCK_PHONE: &str = "+91 9876543210";

/// Sign-in form data.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("email and password are required")]
    MissingCredentials,

    #[error("an account already exists for '{0}'")]
    EmailTaken(String),

    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("identity store unavailable")]
    Unavailable,
}

/// Authentication capability.
///
/// Callers only see `Session`s and `AuthError`s, so a network-backed provider
/// can replace the mock without touching them.
pub trait AuthProvider: Send + Sync {
    fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError>;
    fn register(&self, registration: Registration) -> Result<Session, AuthError>;
}

/// In-memory provider: any non-empty email/password pair signs in.
///
/// Unknown addresses get a mock profile on first sign-in; registered or
/// previously seen addresses get their stored profile back.
#[derive(Debug, Default)]
pub struct MockAuthProvider {
    users: RwLock<HashMap<String, User>>,
}

impl MockAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> Result<usize, AuthError> {
        let users = self.users.read().map_err(|_| AuthError::Unavailable)?;
        Ok(users.len())
    }

    fn mock_profile(email: String) -> User {
        let is_admin = email.eq_ignore_ascii_case(ADMIN_EMAIL);
        User {
            id: UserId::new(),
            name: if is_admin { "Admin User" } else { "John Doe" }.to_string(),
            email,
            role: if is_admin { Role::Admin } else { Role::Farmer },
            location: MOCK_LOCATION.to_string(),
            phone: MOCK_PHONE.to_string(),
            registered_at: Utc::now(),
        }
    }
}

impl AuthProvider for MockAuthProvider {
    fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let email = credentials.email.trim();
        if email.is_empty() || credentials.password.is_empty() {
            tracing::warn!("sign-in rejected: missing credentials");
            return Err(AuthError::MissingCredentials);
        }

        // Accounts are keyed case-insensitively; the profile keeps the address as typed.
        let mut users = self.users.write().map_err(|_| AuthError::Unavailable)?;
        let user = users
            .entry(email.to_lowercase())
            .or_insert_with(|| Self::mock_profile(email.to_string()))
            .clone();

        tracing::info!(user_id = %user.id, role = %user.role, "signed in");
        Ok(Session::with_user(user))
    }

    fn register(&self, registration: Registration) -> Result<Session, AuthError> {
        let registration = registration.validate()?;

        let mut users = self.users.write().map_err(|_| AuthError::Unavailable)?;
        if users.contains_key(&registration.email) {
            tracing::warn!(email = %registration.email, "registration rejected: email taken");
            return Err(AuthError::EmailTaken(registration.email));
        }

        let user = registration.into_user(UserId::new(), Utc::now());
        users.insert(user.email.clone(), user.clone());

        tracing::info!(user_id = %user.id, role = %user.role, "registered");
        Ok(Session::with_user(user))
    }
}
