//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use stockroom_core::auth::StaticCredentials;
use stockroom_core::config::{Credential, Role};
use stockroom_core::store::ProductStore;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Fixture path resolution
// ---------------------------------------------------------------------------

/// Resolve `tests/fixtures/{name}` relative to the workspace root.
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir)
        .join("../../tests/fixtures")
        .join(name)
        .canonicalize()
        .unwrap_or_else(|_| {
            Path::new(manifest_dir)
                .join("../../tests/fixtures")
                .join(name)
        })
}

// ---------------------------------------------------------------------------
// Scratch stores
// ---------------------------------------------------------------------------

/// A store bound to a not-yet-existing file in a fresh temp dir.
///
/// Keep the returned `TempDir` alive for as long as the store is used.
pub fn scratch_store() -> (TempDir, ProductStore) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = ProductStore::new(dir.path().join("products.json"));
    (dir, store)
}

/// Copy a fixture into a temp dir and open a store on the copy, so tests
/// that mutate never touch the checked-in file.
pub fn store_from_fixture(name: &str) -> (TempDir, ProductStore) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let target = dir.path().join("products.json");
    std::fs::copy(fixture_path(name), &target).expect("copy fixture");
    let store = ProductStore::open(&target).expect("open store");
    (dir, store)
}

/// The single-record collection used throughout the search examples.
pub fn red_pen_store() -> (TempDir, ProductStore) {
    let (dir, mut store) = scratch_store();
    let outcome = store
        .add("Red Pen", "Stationery", "10", "5.0")
        .expect("add Red Pen");
    assert!(outcome.is_added());
    (dir, store)
}

// ---------------------------------------------------------------------------
// Credential fixtures
// ---------------------------------------------------------------------------

pub fn fixture_credentials() -> StaticCredentials {
    StaticCredentials::from_entries([
        Credential::new("owner", "s3cret", Role::Admin),
        Credential::new("clerk", "counter", Role::User),
    ])
}

pub fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path).expect("read backing file")
}
