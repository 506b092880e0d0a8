use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainError, DomainResult, Role, RoleRepositoryInterface};
use crate::infrastructure::database::entities::role;

pub struct RoleRepository {
    db: DatabaseConnection,
}

impl RoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(model: role::Model) -> Role {
    Role {
        id: model.id,
        name: model.name,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

#[async_trait]
impl RoleRepositoryInterface for RoleRepository {
    async fn find_all(&self) -> DomainResult<Vec<Role>> {
        let models = role::Entity::find()
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Role>> {
        let model = role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(to_domain))
    }

    async fn insert(&self, name: &str) -> DomainResult<Role> {
        let new_role = role::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };

        let inserted = new_role.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
                DomainError::Conflict(format!("Role already exists: {}", name))
            } else {
                db_err(e)
            }
        })?;

        Ok(to_domain(inserted))
    }
}
