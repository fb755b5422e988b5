//! JSON-file-backed product collection.
//!
//! The whole collection lives in memory and is rewritten to the backing file
//! after every mutation. A missing or unreadable-as-JSON file loads as empty.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::{InventoryConfig, Product};
use crate::error::{AddOutcome, RemoveOutcome, StoreError};
use crate::output::write_products;

/// Ordered product collection mirrored to a single JSON file.
#[derive(Debug, Clone)]
pub struct ProductStore {
    path: PathBuf,
    indent: usize,
    products: Vec<Product>,
}

impl ProductStore {
    /// Empty store bound to `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            indent: InventoryConfig::default().indent,
            products: Vec::new(),
        }
    }

    /// Bind to `path` and load whatever it holds.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    pub fn from_config(config: &InventoryConfig) -> Result<Self, StoreError> {
        let mut store = Self::new(&config.products_path);
        store.indent = config.indent;
        store.load()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Replace the in-memory collection with the backing file's contents.
    ///
    /// Missing or malformed files yield an empty collection. Only I/O failures
    /// other than "not found" are returned as errors, and leave the held
    /// collection as it was.
    pub fn load(&mut self) -> Result<&[Product], StoreError> {
        self.products = match std::fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<Vec<Product>>(&bytes) {
                Ok(products) => products,
                Err(e) => {
                    warn!(
                        "discarding malformed product file {}: {e}",
                        self.path.display()
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no product file at {}, starting empty", self.path.display());
                Vec::new()
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        debug!(
            "loaded {} products from {}",
            self.products.len(),
            self.path.display()
        );
        Ok(&self.products)
    }

    /// Overwrite the backing file with the full collection.
    pub fn save(&self) -> Result<(), StoreError> {
        write_products(&self.products, &self.path, self.indent)?;
        debug!(
            "saved {} products to {}",
            self.products.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Parse the numeric fields and append a product, then save.
    ///
    /// Stock is checked before price. A rejected request changes nothing.
    pub fn add(
        &mut self,
        name: &str,
        category: &str,
        stock_text: &str,
        price_text: &str,
    ) -> Result<AddOutcome, StoreError> {
        let Ok(stock) = stock_text.trim().parse::<i64>() else {
            debug!("rejecting '{name}': stock '{stock_text}' is not an integer");
            return Ok(AddOutcome::InvalidStock(stock_text.to_string()));
        };
        let price = match price_text.trim().parse::<f64>() {
            // JSON has no encoding for inf/NaN
            Ok(price) if price.is_finite() => price,
            _ => {
                debug!("rejecting '{name}': price '{price_text}' is not a finite number");
                return Ok(AddOutcome::InvalidPrice(price_text.to_string()));
            }
        };

        self.products.push(Product::new(name, category, stock, price));
        self.save()?;
        Ok(AddOutcome::Added)
    }

    /// Drop every product whose name matches ignoring case, then save.
    ///
    /// Saves even when nothing matched.
    pub fn remove(&mut self, name: &str) -> Result<RemoveOutcome, StoreError> {
        let before = self.products.len();
        self.products.retain(|p| !p.name_matches(name));
        let removed = before - self.products.len();
        debug!("removed {removed} products named '{name}'");
        self.save()?;
        Ok(RemoveOutcome { removed })
    }

    /// Products whose name or category contains `query`, ignoring case, in
    /// collection order.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.contains_lowered(&needle))
            .collect()
    }
}
