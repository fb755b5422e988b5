//! Username/password lookup that decides which role a login gets.

use std::collections::HashMap;

use log::debug;

use crate::config::{Credential, Role};
use crate::error::AuthError;

/// Resolves a login to a role.
pub trait CredentialLookup {
    fn authenticate(&self, username: &str, password: &str) -> Result<Role, AuthError>;
}

/// Fixed in-process credential table keyed by username.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    entries: HashMap<String, Credential>,
}

impl StaticCredentials {
    /// The demo table shipped with the tracker: one admin, one shop user.
    pub fn builtin() -> Self {
        Self::from_entries([
            Credential::new("admin", "admin123", Role::Admin),
            Credential::new("rahul", "user123", Role::User),
        ])
    }

    /// Later entries replace earlier ones with the same username.
    pub fn from_entries(entries: impl IntoIterator<Item = Credential>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|c| (c.username.clone(), c))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CredentialLookup for StaticCredentials {
    fn authenticate(&self, username: &str, password: &str) -> Result<Role, AuthError> {
        match self.entries.get(username) {
            Some(entry) if entry.password == password => {
                debug!("login accepted for '{username}' as {}", entry.role);
                Ok(entry.role)
            }
            _ => {
                debug!("login rejected for '{username}'");
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}
