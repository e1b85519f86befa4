//! Typed repository failures.
//!
//! Repository functions return `anyhow::Result`; these variants are what
//! callers can `downcast_ref` to when they need to tell failures apart.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("incorrect result size: expected {expected}, actual {actual}")]
    IncorrectResultSize { expected: usize, actual: usize },

    #[error("invalid page request: {0}")]
    InvalidPageRequest(String),

    #[error("no property '{0}' to sort by")]
    UnknownSortProperty(String),

    #[error("no named query '{0}'")]
    UnknownNamedQuery(String),
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
