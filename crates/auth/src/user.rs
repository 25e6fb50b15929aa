//! Marketplace users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrimarket_core::{DomainError, DomainResult, Entity, UserId};

use crate::Role;

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// A signed-in marketplace participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub location: String,
    pub phone: String,
    pub registered_at: DateTime<Utc>,
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registration
// ─────────────────────────────────────────────────────────────────────────────

/// Sign-up form data. Identity and registration time are assigned on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub location: String,
    pub phone: String,
}

impl Registration {
    /// Trim fields and check the minimum a profile needs.
    pub fn validate(self) -> DomainResult<Self> {
        let email = self.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }

        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::missing(format!("registration {email}"), "name"));
        }

        Ok(Self {
            name,
            email,
            role: self.role,
            location: self.location.trim().to_string(),
            phone: self.phone.trim().to_string(),
        })
    }

    pub fn into_user(self, id: UserId, registered_at: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            role: self.role,
            location: self.location,
            phone: self.phone,
            registered_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> Registration {
        Registration {
            name: "  Priya Sharma ".to_string(),
            email: " Priya@Example.com ".to_string(),
            role: Role::Retailer,
            location: "Maharashtra".to_string(),
            phone: "+91 9000000000".to_string(),
        }
    }

    #[test]
    fn validate_normalizes_name_and_email() {
        let reg = registration().validate().unwrap();
        assert_eq!(reg.name, "Priya Sharma");
        assert_eq!(reg.email, "priya@example.com");
    }

    #[test]
    fn validate_rejects_bad_email() {
        let mut reg = registration();
        reg.email = "not-an-email".to_string();
        let err = reg.validate().unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for bad email"),
        }
    }

    #[test]
    fn validate_rejects_blank_name() {
        let mut reg = registration();
        reg.name = " ".to_string();
        assert!(matches!(
            reg.validate(),
            Err(DomainError::MissingField { field: "name", .. })
        ));
    }

    #[test]
    fn into_user_keeps_profile_fields() {
        let id = UserId::new();
        let now = Utc::now();
        let user = registration().validate().unwrap().into_user(id, now);
        assert_eq!(user.id(), &id);
        assert_eq!(user.role, Role::Retailer);
        assert_eq!(user.registered_at, now);
    }
}
