use chrono::{DateTime, Utc};

use crate::domain::role::Role;

/// A managed user account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub enabled: bool,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn has_role(&self, role_id: i32) -> bool {
        self.roles.iter().any(|r| r.id == role_id)
    }

    /// Role names joined for display, e.g. "ROLE_ADMIN, ROLE_USER".
    pub fn role_names(&self) -> String {
        self.roles
            .iter()
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
