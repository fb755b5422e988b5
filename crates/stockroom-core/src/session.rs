//! Screen routing for one login session.
//!
//! A session starts on the login screen. A successful login moves it to the
//! admin or user screen for the rest of the run, until logout. Every screen
//! entry reloads the product collection from disk.

use log::info;

use crate::auth::CredentialLookup;
use crate::config::{Product, Role};
use crate::error::{AddOutcome, AuthError, RemoveOutcome, SessionError};
use crate::store::ProductStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Admin,
    User,
}

impl Screen {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::User => Self::User,
        }
    }

    /// Role held while this screen is shown; `None` before login.
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Login => None,
            Self::Admin => Some(Role::Admin),
            Self::User => Some(Role::User),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Inventory Login",
            Self::Admin => "Admin Dashboard",
            Self::User => "User Dashboard",
        }
    }
}

/// Owns the store and the credential lookup for the lifetime of a UI run.
pub struct Session<C: CredentialLookup> {
    credentials: C,
    store: ProductStore,
    screen: Screen,
}

impl<C: CredentialLookup> Session<C> {
    pub fn new(credentials: C, store: ProductStore) -> Self {
        Self {
            credentials,
            store,
            screen: Screen::Login,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    /// Check credentials and enter the matching screen.
    ///
    /// On rejection the session stays where it was.
    pub fn login(&mut self, username: &str, password: &str) -> Result<Screen, SessionError> {
        let role = self.credentials.authenticate(username, password)?;
        info!("'{username}' logged in as {role}");
        self.enter(Screen::for_role(role))?;
        Ok(self.screen)
    }

    pub fn logout(&mut self) {
        if let Some(role) = self.screen.role() {
            info!("{role} logged out");
        }
        self.screen = Screen::Login;
    }

    /// Re-read the backing file, as happens on every screen entry.
    pub fn refresh(&mut self) -> Result<&[Product], SessionError> {
        Ok(self.store.load()?)
    }

    pub fn products(&self) -> &[Product] {
        self.store.products()
    }

    pub fn search(&self, query: &str) -> Result<Vec<&Product>, SessionError> {
        self.current_role()?;
        Ok(self.store.search(query))
    }

    pub fn add(
        &mut self,
        name: &str,
        category: &str,
        stock_text: &str,
        price_text: &str,
    ) -> Result<AddOutcome, SessionError> {
        self.require_modify("add products")?;
        Ok(self.store.add(name, category, stock_text, price_text)?)
    }

    pub fn remove(&mut self, name: &str) -> Result<RemoveOutcome, SessionError> {
        self.require_modify("remove products")?;
        Ok(self.store.remove(name)?)
    }

    fn enter(&mut self, screen: Screen) -> Result<(), SessionError> {
        self.store.load()?;
        self.screen = screen;
        Ok(())
    }

    fn current_role(&self) -> Result<Role, AuthError> {
        self.screen.role().ok_or(AuthError::NotLoggedIn)
    }

    fn require_modify(&self, action: &'static str) -> Result<(), AuthError> {
        let role = self.current_role()?;
        if role.can_modify() {
            Ok(())
        } else {
            Err(AuthError::NotPermitted { role, action })
        }
    }
}
