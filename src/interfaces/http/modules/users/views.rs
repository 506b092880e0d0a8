//! View models for the user pages
//!
//! Everything the templates need is precomputed here so the templates
//! stay free of logic beyond loops and conditionals.

use askama::Template;

use crate::domain::{Role, User};
use crate::shared::Pager;

/// One row of the user table.
pub struct UserRow {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub enabled: bool,
    pub roles: String,
}

impl From<User> for UserRow {
    fn from(user: User) -> Self {
        let roles = user.role_names();
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            username: user.username,
            email: user.email,
            enabled: user.enabled,
            roles,
        }
    }
}

pub struct SizeOption {
    pub value: u32,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "users.html")]
pub struct UserListPage {
    pub rows: Vec<UserRow>,
    pub pager: Pager,
    pub total: u64,
    pub field: String,
    pub value: String,
    pub size: u32,
    pub sizes: Vec<SizeOption>,
    pub invalid_id: bool,
    pub no_matches: bool,
    pub saved: bool,
    pub updated: bool,
}

/// Per-field inline error messages. An empty string means the field
/// is fine; templates only render non-empty ones.
#[derive(Debug, Default, Clone)]
pub struct FormErrors {
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl FormErrors {
    pub fn any(&self) -> bool {
        !(self.name.is_empty()
            && self.surname.is_empty()
            && self.username.is_empty()
            && self.email.is_empty()
            && self.password.is_empty())
    }
}

/// Field values echoed back into the form inputs.
#[derive(Debug, Default, Clone)]
pub struct UserFormView {
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub enabled: bool,
}

pub struct RoleOption {
    pub id: i32,
    pub name: String,
    pub checked: bool,
}

/// Role checkboxes, pre-checked from `selected` ids.
pub fn role_options(roles: Vec<Role>, selected: &[i32]) -> Vec<RoleOption> {
    roles
        .into_iter()
        .map(|role| RoleOption {
            checked: selected.contains(&role.id),
            id: role.id,
            name: role.name,
        })
        .collect()
}

#[derive(Template)]
#[template(path = "new_user.html")]
pub struct NewUserPage {
    pub form: UserFormView,
    pub roles: Vec<RoleOption>,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "edit_user.html")]
pub struct EditUserPage {
    pub user_id: i32,
    pub form: UserFormView,
    pub roles: Vec<RoleOption>,
    pub errors: FormErrors,
}
