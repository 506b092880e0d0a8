//! HTTP interface — server-rendered admin console
//!
//! - `common`: error-to-response mapping and template rendering helpers
//! - `modules`: one submodule per resource (dto + handlers + views)
//! - `router`: route table and shared state

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_router, ConsoleState};
