//! Core data types and configuration for the inventory.

use serde::{Deserialize, Serialize};

/// Access level granted at login.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Parse from the lowercase wire value.
    pub fn from_str_value(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "user" => Some(Self::User),
            _ => None,
        }
    }

    /// Whether this role may add or remove products.
    pub fn can_modify(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inventory entry. The name is the only identifier and need not be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub category: String,
    pub stock: i64,
    pub price: f64,
}

impl Product {
    pub fn new(name: impl Into<String>, category: impl Into<String>, stock: i64, price: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            stock,
            price,
        }
    }

    /// Case-insensitive exact name comparison.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Case-insensitive substring match on name or category.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn contains_lowered(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}

/// A login entry. Plaintext password compared by exact equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
        }
    }
}

/// Configuration for a store instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    #[serde(default = "default_products_path")]
    pub products_path: String,
    /// Spaces per indentation level in the written file.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_products_path() -> String {
    "products.json".to_string()
}
fn default_indent() -> usize {
    4
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            products_path: default_products_path(),
            indent: default_indent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_roundtrip() {
        for role in [Role::Admin, Role::User] {
            assert_eq!(Role::from_str_value(role.as_str()), Some(role));
        }
    }

    #[test]
    fn unknown_role_from_str() {
        assert_eq!(Role::from_str_value("Admin"), None); // case-sensitive
        assert_eq!(Role::from_str_value("root"), None);
        assert_eq!(Role::from_str_value(""), None);
    }

    #[test]
    fn only_admin_can_modify() {
        assert!(Role::Admin.can_modify());
        assert!(!Role::User.can_modify());
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
        assert_eq!(format!("{}", Role::User), "user");
    }

    #[test]
    fn inventory_config_defaults() {
        let cfg = InventoryConfig::default();
        assert_eq!(cfg.products_path, "products.json");
        assert_eq!(cfg.indent, 4);
    }

    #[test]
    fn inventory_config_fills_missing_fields() {
        let cfg: InventoryConfig = serde_json::from_str(r#"{"products_path": "shop.json"}"#).unwrap();
        assert_eq!(cfg.products_path, "shop.json");
        assert_eq!(cfg.indent, 4);
    }

    #[test]
    fn product_name_matches_ignores_case() {
        let p = Product::new("Notebook", "Stationery", 20, 45.5);
        assert!(p.name_matches("NOTEBOOK"));
        assert!(p.name_matches("notebook"));
        assert!(!p.name_matches("Note"));
    }

    #[test]
    fn product_serialization_keys() {
        let p = Product::new("Red Pen", "Stationery", 10, 5.0);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Red Pen","category":"Stationery","stock":10,"price":5.0}"#
        );
    }
}
