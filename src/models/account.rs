//! User account model and roles.
//!
//! Credential and session handling live outside this crate; the account
//! record only carries the state the rules read: the role and the
//! first-login gate that forces a password change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role attached to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Regular employee access.
    Employee,
}

impl Role {
    /// Stable lowercase name, matching the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "employee" => Ok(Role::Employee),
            _ => Err(()),
        }
    }
}

/// A user account linked to an employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Unique identifier.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Opaque credential hash. Produced and verified elsewhere.
    pub password_hash: String,
    /// The account's role.
    pub role: Role,
    /// The linked employee, if any (admins may have none).
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Set on creation; cleared after the first password change.
    pub first_login: bool,
    /// Whether the account may log in.
    pub active: bool,
    /// Last successful login, if any.
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

impl UserAccount {
    /// Returns true if the account must change its password before doing
    /// anything else. Checked once per authenticated request.
    pub fn requires_password_change(&self) -> bool {
        self.first_login
    }

    /// Records a completed password change, clearing the first-login gate.
    pub fn password_changed(&mut self, new_hash: String) {
        self.password_hash = new_hash;
        self.first_login = false;
    }
}
