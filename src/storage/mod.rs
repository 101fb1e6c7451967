//! Storage Layer
//!
//! SQLite-backed task persistence and chat-identity links.

pub mod database;

pub use database::{Database, DbPool};
