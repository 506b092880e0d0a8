/// Administrator role name
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
/// Default role assigned to new accounts
pub const ROLE_USER: &str = "ROLE_USER";

/// A grantable role, identified by its unique name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: i32,
    pub name: String,
}
