//! Error and outcome types for store and login operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::Role;

/// Failure reaching the backing file.
///
/// A malformed or missing file is not an error; it loads as an empty collection.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Role '{role}' is not permitted to {action}")]
    NotPermitted { role: Role, action: &'static str },
}

/// Failure of an action taken through a [`Session`](crate::session::Session).
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of an add request. Rejections leave the collection and file untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Stock text did not parse as an integer.
    InvalidStock(String),
    /// Price text did not parse as a finite decimal.
    InvalidPrice(String),
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added)
    }
}

impl std::fmt::Display for AddOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added => f.write_str("Product added"),
            Self::InvalidStock(text) => write!(f, "Stock must be a whole number, got '{text}'"),
            Self::InvalidPrice(text) => write!(f, "Price must be a number, got '{text}'"),
        }
    }
}

/// Result of a remove request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveOutcome {
    pub removed: usize,
}

impl RemoveOutcome {
    pub fn is_noop(&self) -> bool {
        self.removed == 0
    }
}
