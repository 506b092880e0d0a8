//! Core business entities, DTOs and repository traits.

pub mod role;
pub mod user;

pub use role::{Role, RoleRepositoryInterface, ROLE_ADMIN, ROLE_USER};
pub use user::{CreateUserDto, UpdateUserDto, User, UserRepositoryInterface};

// Domain code reports failures through the shared error types.
pub use crate::shared::types::errors::{DomainError, DomainResult};
