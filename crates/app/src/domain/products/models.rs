//! Product Models

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
///
/// The inventory record lives on the product: `stock_quantity` plus the
/// `in_stock` availability flag. The flag is false whenever stock reaches
/// zero; `is_active` is a separate merchant toggle.
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: ProductUuid,
    pub title: String,
    pub sku: String,
    pub description: String,
    pub price: u64,
    pub images: Vec<String>,
    pub specifications: serde_json::Value,
    pub is_active: bool,
    pub in_stock: bool,
    pub stock_quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub sku: String,
    pub description: String,
    pub price: u64,
    pub images: Vec<String>,
    pub specifications: serde_json::Value,
    pub stock_quantity: u32,
}

/// Product Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub title: String,
    pub description: String,
    pub price: u64,
    pub images: Vec<String>,
    pub specifications: serde_json::Value,
    pub is_active: bool,
    pub stock_quantity: u32,
}
