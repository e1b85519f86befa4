//! Constants used throughout the crate
//!
//! Defaults for the database, paging and logging configuration live here so
//! that the config module and the tests agree on them.

// Database
pub const DEFAULT_DATABASE_URL: &str = "sqlite://roster.db?mode=rwc";
pub const IN_MEMORY_DATABASE_URL: &str = "sqlite::memory:";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 4;
pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;

// Paging
pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 2000;

// Logging
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_BUFFER_CAPACITY: usize = 1000;

// Files
pub const APP_DIR_NAME: &str = "roster";
pub const LOCAL_CONFIG_FILE: &str = "roster.toml";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOG_FILE_NAME: &str = "roster.log";

// Messages
pub const CONFIG_GENERATED: &str = "Configuration file generated";
