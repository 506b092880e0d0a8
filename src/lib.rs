//! # Admin Console
//!
//! Server-rendered administration console for user accounts and roles.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, DTOs and repository traits
//! - **application**: Business logic (user service, startup seeder)
//! - **infrastructure**: External concerns (database, password hashing)
//! - **interfaces**: HTTP layer with server-rendered HTML pages
//! - **shared**: Cross-cutting types (errors, pagination, shutdown)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export the HTTP router
pub use interfaces::http::{create_router, ConsoleState};
