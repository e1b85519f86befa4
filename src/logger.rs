use anyhow::{Context, Result};
use chrono::Local;
use log::LevelFilter;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::config::LoggingConfig;
use crate::constants::{APP_DIR_NAME, LOG_BUFFER_CAPACITY, LOG_FILE_NAME};

/// Shared logger: a `fern` dispatch feeding the `log` facade, plus an
/// in-memory buffer of recent lines that can be inspected at runtime.
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<VecDeque<String>>>,
    level: LevelFilter,
    file: Option<PathBuf>,
    sqlx_logging: bool,
}

impl Logger {
    /// Logger that only records into the in-memory buffer
    pub fn new(level: LevelFilter) -> Self {
        Self {
            logs: Arc::new(Mutex::new(VecDeque::new())),
            level,
            file: None,
            sqlx_logging: false,
        }
    }

    /// Let sqlx statement logs through at debug level regardless of the
    /// configured level. Mirrors `database.sqlx_logging`.
    pub fn with_sqlx_logging(mut self, enabled: bool) -> Self {
        self.sqlx_logging = enabled;
        self
    }

    pub fn from_config(config: &LoggingConfig) -> Result<Self> {
        let mut logger = Self::new(config.level_filter());
        if config.enabled {
            let path = match &config.file {
                Some(path) => path.clone(),
                None => Self::get_log_file_path()?,
            };
            logger.file = Some(path);
        }
        Ok(logger)
    }

    /// Build the dispatch without installing it.
    pub fn dispatch(&self) -> Result<fern::Dispatch> {
        let buffer = Arc::clone(&self.logs);
        let sqlx_level = if self.sqlx_logging {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        };
        let mut dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{}] {:<5} {}: {}",
                    Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(self.level)
            .level_for("sqlx", sqlx_level)
            .chain(fern::Output::call(move |record| {
                Self::push(&buffer, record.args().to_string());
            }));

        if let Some(path) = &self.file {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
            }
            let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(file);
        }

        Ok(dispatch)
    }

    /// Install as the global `log` backend. Fails if one is already set.
    pub fn install(&self) -> Result<()> {
        self.dispatch()?
            .apply()
            .context("A global logger is already installed")?;
        Ok(())
    }

    /// Add a log entry directly to the buffer
    pub fn log(&self, message: String) {
        let formatted_message = format!("[{}] {}", Local::now().format("%H:%M:%S%.3f"), message);
        Self::push(&self.logs, formatted_message);
    }

    fn push(logs: &Mutex<VecDeque<String>>, line: String) {
        if let Ok(mut logs) = logs.lock() {
            if logs.len() == LOG_BUFFER_CAPACITY {
                logs.pop_front();
            }
            logs.push_back(line);
        }
    }

    /// Get all logs, newest first
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            logs.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    pub fn has_file_writer(&self) -> bool {
        self.file.is_some()
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Default log file location inside the user cache directory
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))
            .map(|dir| dir.join(APP_DIR_NAME).join(LOG_FILE_NAME))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LevelFilter::Info)
    }
}
