//! JSON serialisation of the collection and listing-line rendering.

use std::path::Path;

use serde::Serialize;

use crate::config::Product;
use crate::error::StoreError;

/// Encode the collection as a JSON array indented by `indent` spaces.
pub fn to_json(products: &[Product], indent: usize) -> Result<Vec<u8>, serde_json::Error> {
    let indent = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    products.serialize(&mut ser)?;
    Ok(buf)
}

/// Overwrite `path` with the encoded collection.
///
/// Plain write: a crash mid-write leaves a truncated file.
pub fn write_products(products: &[Product], path: &Path, indent: usize) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
    }
    let json = to_json(products, indent)?;
    std::fs::write(path, json).map_err(|e| StoreError::io(path, e))
}

/// One listing line: `name | ₹price | Stock: n | category`.
pub fn format_product_line(product: &Product) -> String {
    format!(
        "{} | ₹{} | Stock: {} | {}",
        product.name,
        format_price(product.price),
        product.stock,
        product.category
    )
}

/// Price with at least one fractional digit (`20.0`, `45.5`).
pub fn format_price(price: f64) -> String {
    format!("{price:?}")
}

/// Render a listing, one product per line, each newline-terminated.
pub fn format_listing<'a, I>(products: I) -> String
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .map(|p| format_product_line(p) + "\n")
        .collect()
}
