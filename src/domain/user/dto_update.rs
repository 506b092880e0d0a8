/// Submitted fields merged into a persisted user on edit.
///
/// `password` carries a new plain-text password only when the admin
/// typed one; `None` keeps the stored hash.
#[derive(Debug, Clone)]
pub struct UpdateUserDto {
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub password: Option<String>,
    pub enabled: bool,
    pub role_ids: Vec<i32>,
}
