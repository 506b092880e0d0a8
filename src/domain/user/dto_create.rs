/// Fields needed to create a new account. `password` is plain text and
/// gets hashed by the repository on insert.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub enabled: bool,
    pub role_ids: Vec<i32>,
}
