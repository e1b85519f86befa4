//! Roster - member and team data access
//!
//! This library stores members and the teams they belong to in SQLite
//! through SeaORM. It offers two styles of repository over the same
//! tables: one written against raw SQL strings and one built from the
//! query builder.
//!
//! # Modules
//!
//! * [`config`] - Application configuration management
//! * [`entities`] - SeaORM entity models for the `members` and `teams` tables
//! * [`repositories`] - Query functions over the entities
//! * [`paging`] - Page requests, sorting, and page/slice results
//! * [`storage`] - Connection setup and schema creation

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Typed repository errors
pub mod error;

/// Logging setup and in-memory log buffer
pub mod logger;

/// Paging and sorting primitives
pub mod paging;

/// Repository layer for database operations
pub mod repositories;

/// Database connection and schema management
pub mod storage;

// Re-export entity models for convenient access
pub use entities::{member, team};
pub use error::RepositoryError;
