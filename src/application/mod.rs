pub mod identity;

pub use identity::{Seeder, UserSearchOutcome, UserSearchQuery, UserService};
