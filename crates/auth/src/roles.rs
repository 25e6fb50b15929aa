use serde::{Deserialize, Serialize};

/// Marketplace role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer,
    Wholesaler,
    Retailer,
    Civilian,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Farmer => "farmer",
            Role::Wholesaler => "wholesaler",
            Role::Retailer => "retailer",
            Role::Civilian => "civilian",
            Role::Admin => "admin",
        }
    }

    /// Whether the role may publish listings.
    pub fn can_sell(self) -> bool {
        match self {
            Role::Farmer | Role::Wholesaler => true,
            Role::Retailer | Role::Civilian | Role::Admin => false,
        }
    }

    /// Commercial buyers may place bulk orders.
    pub fn can_bulk_order(self) -> bool {
        match self {
            Role::Wholesaler | Role::Retailer => true,
            Role::Farmer | Role::Civilian | Role::Admin => false,
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
