//! Startup seeding — baseline roles and the first admin account
//!
//! Runs once after migrations. Roles are matched by name so reruns
//! never duplicate them; the admin account is only created while the
//! users table is empty, so deleting it later does not resurrect it
//! on every restart.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AdminConfig;
use crate::domain::{
    CreateUserDto, DomainResult, Role, RoleRepositoryInterface, UserRepositoryInterface,
    ROLE_ADMIN, ROLE_USER,
};

pub struct Seeder<U: UserRepositoryInterface, R: RoleRepositoryInterface> {
    users: Arc<U>,
    roles: Arc<R>,
    admin: AdminConfig,
}

impl<U: UserRepositoryInterface, R: RoleRepositoryInterface> Seeder<U, R> {
    pub fn new(users: Arc<U>, roles: Arc<R>, admin: AdminConfig) -> Self {
        Self {
            users,
            roles,
            admin,
        }
    }

    pub async fn run(&self) -> DomainResult<()> {
        let admin_role = self.ensure_role(ROLE_ADMIN).await?;
        self.ensure_role(ROLE_USER).await?;

        if self.users.count().await? > 0 {
            return Ok(());
        }

        info!("No accounts found, creating default admin user");
        let admin = self
            .users
            .insert(CreateUserDto {
                name: "Admin".to_string(),
                surname: "Admin".to_string(),
                username: self.admin.username.clone(),
                email: self.admin.email.clone(),
                password: self.admin.password.clone(),
                enabled: true,
                role_ids: vec![admin_role.id],
            })
            .await?;

        warn!(
            username = %admin.username,
            "Default admin created with the configured password, change it"
        );
        Ok(())
    }

    async fn ensure_role(&self, name: &str) -> DomainResult<Role> {
        if let Some(role) = self.roles.find_by_name(name).await? {
            return Ok(role);
        }
        let role = self.roles.insert(name).await?;
        info!(role = %role.name, "Role created");
        Ok(role)
    }
}
