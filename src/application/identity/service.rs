//! User management service — application-layer orchestration
//!
//! All account-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, Role, RoleRepositoryInterface, UpdateUserDto, User,
    UserRepositoryInterface, ROLE_USER,
};
use crate::shared::{PageRequest, PaginatedResult};

/// Hard ceiling on rows per page, whatever the query string asks for.
const MAX_PAGE_SIZE: u32 = 100;

/// A user-list request as it arrives from the browser.
#[derive(Debug, Clone, Default)]
pub struct UserSearchQuery {
    /// Column to search in (`id`, `name`, `surname`, `username`, `email`).
    pub field: Option<String>,
    pub value: Option<String>,
    /// 1-based page number.
    pub page: u32,
    pub size: Option<u32>,
}

/// Result of a user-list request, including the flags the list
/// view renders as banners.
#[derive(Debug, Clone)]
pub struct UserSearchOutcome {
    pub page: PaginatedResult<User>,
    /// Search-by-id received a value that is not a number.
    pub invalid_id: bool,
    /// The search matched nothing; `page` holds the unfiltered list instead.
    pub no_matches: bool,
}

/// User service — orchestrates all account-management use-cases.
///
/// Generic over the repository traits so it stays decoupled from
/// the concrete persistence layer.
pub struct UserService<U: UserRepositoryInterface, R: RoleRepositoryInterface> {
    users: Arc<U>,
    roles: Arc<R>,
    default_page_size: u32,
}

impl<U: UserRepositoryInterface, R: RoleRepositoryInterface> UserService<U, R> {
    pub fn new(users: Arc<U>, roles: Arc<R>, default_page_size: u32) -> Self {
        Self {
            users,
            roles,
            default_page_size: default_page_size.max(1),
        }
    }

    // ── Listing & search ────────────────────────────────────────

    /// List users, optionally filtered by one column.
    ///
    /// A search that matches nothing (or an unparsable id) falls back
    /// to the unfiltered first page, with the corresponding flag set so
    /// the view can explain what happened.
    pub async fn search_users(&self, query: UserSearchQuery) -> DomainResult<UserSearchOutcome> {
        let size = self.resolve_size(query.size);
        let request = PageRequest {
            page: query.page.saturating_sub(1),
            size,
        };

        let field = query.field.as_deref().unwrap_or("").trim();
        let value = query.value.as_deref().unwrap_or("").trim();

        if field.is_empty() || value.is_empty() {
            let page = self.users.find_page(request).await?;
            return Ok(UserSearchOutcome {
                page,
                invalid_id: false,
                no_matches: false,
            });
        }

        if field == "id" {
            return self.search_by_id(value, size).await;
        }

        let page = match field {
            "name" => self.users.find_by_name_containing(value, request).await?,
            "surname" => self.users.find_by_surname_containing(value, request).await?,
            "username" => {
                self.users
                    .find_by_username_containing(value, request)
                    .await?
            }
            "email" => self.users.find_by_email_containing(value, request).await?,
            _ => PaginatedResult::empty(1, size),
        };

        if page.total == 0 {
            return self.unfiltered_fallback(size, false).await;
        }

        Ok(UserSearchOutcome {
            page,
            invalid_id: false,
            no_matches: false,
        })
    }

    async fn search_by_id(&self, value: &str, size: u32) -> DomainResult<UserSearchOutcome> {
        let id = match value.parse::<i32>() {
            Ok(id) => id,
            Err(_) => return self.unfiltered_fallback(size, true).await,
        };

        match self.users.find_by_id(id).await? {
            Some(user) => Ok(UserSearchOutcome {
                page: PaginatedResult::new(vec![user], 1, 1, size),
                invalid_id: false,
                no_matches: false,
            }),
            None => self.unfiltered_fallback(size, false).await,
        }
    }

    /// First unfiltered page, flagged either as an id-format error or as
    /// an empty search result.
    async fn unfiltered_fallback(
        &self,
        size: u32,
        invalid_id: bool,
    ) -> DomainResult<UserSearchOutcome> {
        let page = self.users.find_page(PageRequest { page: 0, size }).await?;
        Ok(UserSearchOutcome {
            page,
            invalid_id,
            no_matches: !invalid_id,
        })
    }

    fn resolve_size(&self, requested: Option<u32>) -> u32 {
        requested
            .filter(|s| *s > 0)
            .unwrap_or(self.default_page_size)
            .min(MAX_PAGE_SIZE)
    }

    // ── Single user ─────────────────────────────────────────────

    pub async fn find_user(&self, id: i32) -> DomainResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            })
    }

    // ── Duplicate checks ────────────────────────────────────────

    /// Is `email` already used by another account? `exclude` skips the
    /// account being edited so its own email does not count.
    pub async fn email_taken(&self, email: &str, exclude: Option<i32>) -> DomainResult<bool> {
        let existing = match exclude {
            Some(id) => self.users.find_by_email_and_id_not(email, id).await?,
            None => self.users.find_by_email(email).await?,
        };
        Ok(existing.is_some())
    }

    pub async fn username_taken(&self, username: &str, exclude: Option<i32>) -> DomainResult<bool> {
        let existing = match exclude {
            Some(id) => self.users.find_by_username_and_id_not(username, id).await?,
            None => self.users.find_by_username(username).await?,
        };
        Ok(existing.is_some())
    }

    // ── Mutations ───────────────────────────────────────────────

    /// Create an account. Accounts created without an explicit role
    /// selection get `ROLE_USER`.
    pub async fn create_user(&self, mut dto: CreateUserDto) -> DomainResult<User> {
        if self.username_taken(&dto.username, None).await? {
            return Err(DomainError::Conflict("Username already exists".into()));
        }
        if self.email_taken(&dto.email, None).await? {
            return Err(DomainError::Conflict("Email already exists".into()));
        }

        if dto.role_ids.is_empty() {
            if let Some(role) = self.roles.find_by_name(ROLE_USER).await? {
                dto.role_ids.push(role.id);
            }
        }

        let user = self.users.insert(dto).await?;
        info!(user_id = user.id, username = %user.username, "User account created");
        Ok(user)
    }

    pub async fn update_user(&self, id: i32, dto: UpdateUserDto) -> DomainResult<User> {
        if self.username_taken(&dto.username, Some(id)).await? {
            return Err(DomainError::Conflict("Username already exists".into()));
        }
        if self.email_taken(&dto.email, Some(id)).await? {
            return Err(DomainError::Conflict("Email already exists".into()));
        }

        let user = self
            .users
            .update(id, dto)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            })?;
        info!(user_id = user.id, username = %user.username, "User account updated");
        Ok(user)
    }

    // ── Roles ───────────────────────────────────────────────────

    pub async fn all_roles(&self) -> DomainResult<Vec<Role>> {
        self.roles.find_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::{RoleRepository, UserRepository};
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    async fn service() -> UserService<UserRepository, RoleRepository> {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        UserService::new(
            Arc::new(UserRepository::new(db.clone())),
            Arc::new(RoleRepository::new(db)),
            10,
        )
    }

    fn new_user(username: &str, email: &str) -> CreateUserDto {
        CreateUserDto {
            name: "Test".into(),
            surname: "User".into(),
            username: username.into(),
            email: email.into(),
            password: "secret123".into(),
            enabled: true,
            role_ids: vec![],
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let svc = service().await;
        svc.create_user(new_user("alice", "alice@example.com"))
            .await
            .unwrap();

        let err = svc
            .create_user(new_user("bob", "alice@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_allows_keeping_own_email() {
        let svc = service().await;
        let user = svc
            .create_user(new_user("alice", "alice@example.com"))
            .await
            .unwrap();

        let updated = svc
            .update_user(
                user.id,
                UpdateUserDto {
                    name: "Alice".into(),
                    surname: "Smith".into(),
                    username: "alice".into(),
                    email: "alice@example.com".into(),
                    password: None,
                    enabled: true,
                    role_ids: vec![],
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.surname, "Smith");
    }

    #[tokio::test]
    async fn update_rejects_email_of_another_account() {
        let svc = service().await;
        svc.create_user(new_user("alice", "alice@example.com"))
            .await
            .unwrap();
        let bob = svc
            .create_user(new_user("bob", "bob@example.com"))
            .await
            .unwrap();

        let err = svc
            .update_user(
                bob.id,
                UpdateUserDto {
                    name: "Bob".into(),
                    surname: "User".into(),
                    username: "bob".into(),
                    email: "alice@example.com".into(),
                    password: None,
                    enabled: true,
                    role_ids: vec![],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn blank_password_keeps_existing_hash() {
        let svc = service().await;
        let user = svc
            .create_user(new_user("alice", "alice@example.com"))
            .await
            .unwrap();
        let original_hash = user.password_hash.clone();

        let updated = svc
            .update_user(
                user.id,
                UpdateUserDto {
                    name: "Test".into(),
                    surname: "User".into(),
                    username: "alice".into(),
                    email: "alice@example.com".into(),
                    password: Some(String::new()),
                    enabled: true,
                    role_ids: vec![],
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.password_hash, original_hash);
    }

    #[tokio::test]
    async fn unparsable_id_search_falls_back_to_full_list() {
        let svc = service().await;
        svc.create_user(new_user("alice", "alice@example.com"))
            .await
            .unwrap();

        let outcome = svc
            .search_users(UserSearchQuery {
                field: Some("id".into()),
                value: Some("not-a-number".into()),
                page: 1,
                size: None,
            })
            .await
            .unwrap();

        assert!(outcome.invalid_id);
        assert!(!outcome.no_matches);
        assert_eq!(outcome.page.total, 1);
    }

    #[tokio::test]
    async fn empty_search_result_falls_back_with_flag() {
        let svc = service().await;
        svc.create_user(new_user("alice", "alice@example.com"))
            .await
            .unwrap();

        let outcome = svc
            .search_users(UserSearchQuery {
                field: Some("surname".into()),
                value: Some("zzz-no-such".into()),
                page: 1,
                size: None,
            })
            .await
            .unwrap();

        assert!(outcome.no_matches);
        assert!(!outcome.invalid_id);
        assert_eq!(outcome.page.total, 1);
    }

    #[tokio::test]
    async fn search_by_existing_id_returns_single_row_page() {
        let svc = service().await;
        let user = svc
            .create_user(new_user("alice", "alice@example.com"))
            .await
            .unwrap();
        svc.create_user(new_user("bob", "bob@example.com"))
            .await
            .unwrap();

        let outcome = svc
            .search_users(UserSearchQuery {
                field: Some("id".into()),
                value: Some(user.id.to_string()),
                page: 1,
                size: None,
            })
            .await
            .unwrap();

        assert_eq!(outcome.page.total, 1);
        assert_eq!(outcome.page.items.len(), 1);
        assert_eq!(outcome.page.items[0].username, "alice");
    }

    #[tokio::test]
    async fn substring_search_matches_surname() {
        let svc = service().await;
        let mut dto = new_user("alice", "alice@example.com");
        dto.surname = "Johnson".into();
        svc.create_user(dto).await.unwrap();
        svc.create_user(new_user("bob", "bob@example.com"))
            .await
            .unwrap();

        let outcome = svc
            .search_users(UserSearchQuery {
                field: Some("surname".into()),
                value: Some("ohns".into()),
                page: 1,
                size: None,
            })
            .await
            .unwrap();

        assert_eq!(outcome.page.total, 1);
        assert_eq!(outcome.page.items[0].username, "alice");
    }
}
