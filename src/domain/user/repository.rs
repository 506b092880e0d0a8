use async_trait::async_trait;

use super::{CreateUserDto, UpdateUserDto, User};
use crate::domain::DomainResult;
use crate::shared::{PageRequest, PaginatedResult};

/// Persistence interface for user accounts.
///
/// One finder per searchable column keeps the search dispatch in the
/// service a plain match over field names.
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn find_page(&self, page: PageRequest) -> DomainResult<PaginatedResult<User>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>>;

    async fn find_by_name_containing(
        &self,
        needle: &str,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<User>>;
    async fn find_by_surname_containing(
        &self,
        needle: &str,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<User>>;
    async fn find_by_username_containing(
        &self,
        needle: &str,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<User>>;
    async fn find_by_email_containing(
        &self,
        needle: &str,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<User>>;

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn find_by_username_and_id_not(
        &self,
        username: &str,
        id: i32,
    ) -> DomainResult<Option<User>>;
    async fn find_by_email_and_id_not(&self, email: &str, id: i32)
        -> DomainResult<Option<User>>;

    async fn insert(&self, dto: CreateUserDto) -> DomainResult<User>;
    async fn update(&self, id: i32, dto: UpdateUserDto) -> DomainResult<Option<User>>;
    async fn count(&self) -> DomainResult<u64>;
}
