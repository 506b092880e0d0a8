//! Form and query-string DTOs for the user pages

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use super::views::FormErrors;

/// Query parameters of the user list page.
#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    pub field: Option<String>,
    pub value: Option<String>,
    /// 1-based; zero or negative values fall back to the first page.
    #[serde(default = "default_page")]
    pub page: i64,
    pub size: Option<u32>,
    /// Set by the redirect after a successful create.
    pub saved: Option<u8>,
    /// Set by the redirect after a successful update.
    pub updated: Option<u8>,
}

fn default_page() -> i64 {
    1
}

/// Create-user form body. Checkboxes are absent from the body when
/// unchecked, hence the `serde(default)`s.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserForm {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "Surname is required"))]
    pub surname: String,
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    pub username: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub role_ids: Vec<i32>,
}

/// Edit-user form body. A blank password keeps the current one.
#[derive(Debug, Deserialize, Validate)]
pub struct EditUserForm {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "Surname is required"))]
    pub surname: String,
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    pub username: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    pub password: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub role_ids: Vec<i32>,
}

impl EditUserForm {
    /// Passwords are optional on edit, so the length rule only applies
    /// when something was typed.
    pub fn password_error(&self) -> Option<&'static str> {
        match self.password.as_deref() {
            Some(p) if !p.is_empty() && p.len() < 4 => {
                Some("Password must be at least 4 characters")
            }
            _ => None,
        }
    }
}

/// Flatten validator's per-field error map into the view model the
/// form templates render inline.
pub fn flatten_errors(errors: &ValidationErrors) -> FormErrors {
    let mut out = FormErrors::default();
    for (field, field_errors) in errors.field_errors() {
        let Some(first) = field_errors.first() else {
            continue;
        };
        let message = first
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "Invalid value".to_string());
        match field {
            "name" => out.name = message,
            "surname" => out.surname = message,
            "username" => out.username = message,
            "email" => out.email = message,
            "password" => out.password = message,
            _ => {}
        }
    }
    out
}
