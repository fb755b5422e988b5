//! Stockroom Core: product store and login check for a small-shop inventory tracker.
//!
//! This crate holds everything independent of the front end: the JSON-backed
//! product collection, the credential lookup, and login-to-screen routing.

pub mod auth;
pub mod config;
pub mod error;
pub mod output;
pub mod session;
pub mod store;
