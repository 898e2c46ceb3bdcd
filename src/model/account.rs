use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Type-safe identifier for users (customers and chefs share one id space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Chef,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "chef" => Ok(Role::Chef),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// A user's public profile, used to resolve display names.
///
/// # Actor Framework
/// Managed by the account actor, see [`crate::account_actor`].
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: UserId,
    pub name: String,
    pub role: Role,
}

/// Payload for registering an account.
#[derive(Debug, Clone)]
pub struct AccountCreate {
    pub name: String,
    pub role: Role,
}
