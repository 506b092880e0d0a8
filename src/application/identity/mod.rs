//! Identity module — user and role management
//!
//! Contains the `UserService` which orchestrates all account
//! use-cases (listing, searching, creation, updates) and the
//! `Seeder` which provisions baseline roles and the first admin.

pub mod seeder;
pub mod service;

pub use seeder::Seeder;
pub use service::{UserSearchOutcome, UserSearchQuery, UserService};
