use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, LoaderTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, Role, UpdateUserDto, User, UserRepositoryInterface,
};
use crate::infrastructure::crypto::password::hash_password;
use crate::infrastructure::database::entities::{role, user, user_role};
use crate::shared::{PageRequest, PaginatedResult};

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn role_model_to_domain(model: role::Model) -> Role {
    Role {
        id: model.id,
        name: model.name,
    }
}

fn user_model_to_domain(model: user::Model, roles: Vec<role::Model>) -> User {
    User {
        id: model.id,
        name: model.name,
        surname: model.surname,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        enabled: model.enabled,
        roles: roles.into_iter().map(role_model_to_domain).collect(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

fn unique_violation(e: sea_orm::DbErr) -> DomainError {
    if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
        DomainError::Conflict("Username or email already exists".to_string())
    } else {
        db_err(e)
    }
}

impl UserRepository {
    /// Run a filtered query through SeaORM's paginator and attach roles.
    async fn fetch_paged(
        &self,
        query: sea_orm::Select<user::Entity>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<User>> {
        let paginator = query
            .order_by_asc(user::Column::Id)
            .paginate(&self.db, page.size.max(1) as u64);

        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator
            .fetch_page(page.page as u64)
            .await
            .map_err(db_err)?;

        let items = attach_roles(models, &self.db).await?;
        Ok(PaginatedResult::new(items, total, page.page + 1, page.size))
    }

    async fn fetch_one(
        &self,
        query: sea_orm::Select<user::Entity>,
    ) -> DomainResult<Option<User>> {
        let model = query.one(&self.db).await.map_err(db_err)?;
        let Some(model) = model else {
            return Ok(None);
        };
        let roles = model
            .find_related(role::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(Some(user_model_to_domain(model, roles)))
    }
}

/// Load assigned roles for a batch of user rows via the join table.
async fn attach_roles<C: ConnectionTrait>(
    models: Vec<user::Model>,
    conn: &C,
) -> DomainResult<Vec<User>> {
    let roles = models
        .load_many_to_many(role::Entity::find(), user_role::Entity, conn)
        .await
        .map_err(db_err)?;

    Ok(models
        .into_iter()
        .zip(roles)
        .map(|(model, roles)| user_model_to_domain(model, roles))
        .collect())
}

async fn replace_role_assignments<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
    role_ids: &[i32],
) -> DomainResult<()> {
    user_role::Entity::delete_many()
        .filter(user_role::Column::UserId.eq(user_id))
        .exec(conn)
        .await
        .map_err(db_err)?;

    if role_ids.is_empty() {
        return Ok(());
    }

    let rows = role_ids.iter().map(|role_id| user_role::ActiveModel {
        user_id: Set(user_id),
        role_id: Set(*role_id),
    });
    user_role::Entity::insert_many(rows)
        .exec(conn)
        .await
        .map_err(db_err)?;

    Ok(())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn find_page(&self, page: PageRequest) -> DomainResult<PaginatedResult<User>> {
        self.fetch_paged(user::Entity::find(), page).await
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        self.fetch_one(user::Entity::find_by_id(id)).await
    }

    async fn find_by_name_containing(
        &self,
        needle: &str,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<User>> {
        self.fetch_paged(
            user::Entity::find().filter(user::Column::Name.contains(needle)),
            page,
        )
        .await
    }

    async fn find_by_surname_containing(
        &self,
        needle: &str,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<User>> {
        self.fetch_paged(
            user::Entity::find().filter(user::Column::Surname.contains(needle)),
            page,
        )
        .await
    }

    async fn find_by_username_containing(
        &self,
        needle: &str,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<User>> {
        self.fetch_paged(
            user::Entity::find().filter(user::Column::Username.contains(needle)),
            page,
        )
        .await
    }

    async fn find_by_email_containing(
        &self,
        needle: &str,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<User>> {
        self.fetch_paged(
            user::Entity::find().filter(user::Column::Email.contains(needle)),
            page,
        )
        .await
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        self.fetch_one(user::Entity::find().filter(user::Column::Username.eq(username)))
            .await
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        self.fetch_one(user::Entity::find().filter(user::Column::Email.eq(email)))
            .await
    }

    async fn find_by_username_and_id_not(
        &self,
        username: &str,
        id: i32,
    ) -> DomainResult<Option<User>> {
        self.fetch_one(
            user::Entity::find()
                .filter(user::Column::Username.eq(username))
                .filter(user::Column::Id.ne(id)),
        )
        .await
    }

    async fn find_by_email_and_id_not(
        &self,
        email: &str,
        id: i32,
    ) -> DomainResult<Option<User>> {
        self.fetch_one(
            user::Entity::find()
                .filter(user::Column::Email.eq(email))
                .filter(user::Column::Id.ne(id)),
        )
        .await
    }

    async fn insert(&self, dto: CreateUserDto) -> DomainResult<User> {
        let password_hash = hash_password(&dto.password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;
        let now = Utc::now();

        let txn = self.db.begin().await.map_err(db_err)?;

        let new_user = user::ActiveModel {
            name: Set(dto.name),
            surname: Set(dto.surname),
            username: Set(dto.username),
            email: Set(dto.email),
            password_hash: Set(password_hash),
            enabled: Set(dto.enabled),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = new_user.insert(&txn).await.map_err(unique_violation)?;
        replace_role_assignments(&txn, inserted.id, &dto.role_ids).await?;

        txn.commit().await.map_err(db_err)?;

        self.find_by_id(inserted.id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: inserted.id.to_string(),
            })
    }

    async fn update(&self, id: i32, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let existing = user::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.into();
        active.name = Set(dto.name);
        active.surname = Set(dto.surname);
        active.username = Set(dto.username);
        active.email = Set(dto.email);
        active.enabled = Set(dto.enabled);
        active.updated_at = Set(Utc::now());

        if let Some(password) = dto.password.filter(|p| !p.is_empty()) {
            let password_hash = hash_password(&password).map_err(|e| {
                DomainError::Validation(format!("Failed to hash password: {}", e))
            })?;
            active.password_hash = Set(password_hash);
        }

        active.update(&txn).await.map_err(unique_violation)?;
        replace_role_assignments(&txn, id, &dto.role_ids).await?;

        txn.commit().await.map_err(db_err)?;

        self.find_by_id(id).await
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoleRepositoryInterface;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::RoleRepository;
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    async fn repos() -> (UserRepository, RoleRepository) {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        (UserRepository::new(db.clone()), RoleRepository::new(db))
    }

    fn dto(username: &str, email: &str, role_ids: Vec<i32>) -> CreateUserDto {
        CreateUserDto {
            name: "Test".into(),
            surname: "User".into(),
            username: username.into(),
            email: email.into(),
            password: "secret123".into(),
            enabled: true,
            role_ids,
        }
    }

    #[tokio::test]
    async fn insert_hashes_password_and_loads_roles() {
        let (users, roles) = repos().await;
        let admin_role = roles.insert("ROLE_ADMIN").await.unwrap();

        let user = users
            .insert(dto("alice", "alice@example.com", vec![admin_role.id]))
            .await
            .unwrap();

        assert_ne!(user.password_hash, "secret123");
        assert_eq!(user.roles.len(), 1);
        assert_eq!(user.roles[0].name, "ROLE_ADMIN");
    }

    #[tokio::test]
    async fn duplicate_username_maps_to_conflict() {
        let (users, _) = repos().await;
        users
            .insert(dto("alice", "alice@example.com", vec![]))
            .await
            .unwrap();

        let err = users
            .insert(dto("alice", "other@example.com", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(users.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn pages_are_sized_and_counted() {
        let (users, _) = repos().await;
        for i in 0..7 {
            users
                .insert(dto(&format!("user{i}"), &format!("user{i}@example.com"), vec![]))
                .await
                .unwrap();
        }

        let page = users
            .find_page(PageRequest { page: 1, size: 3 })
            .await
            .unwrap();
        assert_eq!(page.total, 7);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.items[0].username, "user3");
    }

    #[tokio::test]
    async fn update_replaces_role_set() {
        let (users, roles) = repos().await;
        let admin_role = roles.insert("ROLE_ADMIN").await.unwrap();
        let user_role = roles.insert("ROLE_USER").await.unwrap();

        let user = users
            .insert(dto("alice", "alice@example.com", vec![admin_role.id]))
            .await
            .unwrap();

        let updated = users
            .update(
                user.id,
                UpdateUserDto {
                    name: "Test".into(),
                    surname: "User".into(),
                    username: "alice".into(),
                    email: "alice@example.com".into(),
                    password: None,
                    enabled: false,
                    role_ids: vec![user_role.id],
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert!(!updated.enabled);
        assert_eq!(updated.roles.len(), 1);
        assert_eq!(updated.roles[0].name, "ROLE_USER");
    }

    #[tokio::test]
    async fn id_not_finders_exclude_the_given_row() {
        let (users, _) = repos().await;
        let alice = users
            .insert(dto("alice", "alice@example.com", vec![]))
            .await
            .unwrap();

        let same_row = users
            .find_by_email_and_id_not("alice@example.com", alice.id)
            .await
            .unwrap();
        assert!(same_row.is_none());

        let other = users
            .find_by_email_and_id_not("alice@example.com", alice.id + 1)
            .await
            .unwrap();
        assert!(other.is_some());
    }

    #[tokio::test]
    async fn substring_finders_match_partial_values() {
        let (users, _) = repos().await;
        users
            .insert(dto("jsmith", "j@example.com", vec![]))
            .await
            .unwrap();

        let page = users
            .find_by_username_containing("smit", PageRequest { page: 0, size: 10 })
            .await
            .unwrap();
        assert_eq!(page.total, 1);

        let none = users
            .find_by_username_containing("zzz", PageRequest { page: 0, size: 10 })
            .await
            .unwrap();
        assert_eq!(none.total, 0);
    }
}
