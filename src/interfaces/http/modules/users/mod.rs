//! User administration pages
//!
//! List/search, create and edit forms, all server-rendered.

pub mod dto;
pub mod handlers;
pub mod views;

pub use handlers::UserPagesState;
