//! ReaderShelf Database Layer
//!
//! This crate provides storage operations for the ReaderShelf reading
//! tracker. It uses SQLite with sqlx; one query module per entity, with
//! embedded migrations.

pub mod connection;
pub mod migrations;
pub mod queries;

pub use connection::{connect, create_test_db, DatabaseConfig, DbPool};
pub use migrations::{current_version, optimize, run_migrations, verify_integrity};
