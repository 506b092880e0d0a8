use async_trait::async_trait;

use super::Role;
use crate::domain::DomainResult;

#[async_trait]
pub trait RoleRepositoryInterface: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Role>>;
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Role>>;
    async fn insert(&self, name: &str) -> DomainResult<Role>;
}
