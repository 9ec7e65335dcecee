//! Product response DTOs shared by the product handlers.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::models::Product;

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// Product title
    pub title: String,

    /// Stock-keeping unit
    pub sku: String,

    /// Product description
    pub description: String,

    /// Price in minor units
    pub price: u64,

    /// Image URLs
    pub images: Vec<String>,

    /// Free-form specifications
    pub specifications: serde_json::Value,

    /// Whether the product is merchant-activated
    pub is_active: bool,

    /// Whether the product currently has stock
    pub in_stock: bool,

    /// Units in stock
    pub stock_quantity: u32,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            title: product.title,
            sku: product.sku,
            description: product.description,
            price: product.price,
            images: product.images,
            specifications: product.specifications,
            is_active: product.is_active,
            in_stock: product.in_stock,
            stock_quantity: product.stock_quantity,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}
