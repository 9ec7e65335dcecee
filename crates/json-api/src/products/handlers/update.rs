//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::models::{ProductUpdate, ProductUuid};

use crate::{
    extensions::*,
    products::{errors::into_status_error, responses::ProductResponse},
    state::State,
};

/// Update Product Request
///
/// Replaces the product's mutable details; the SKU is immutable and the
/// availability flag is recomputed from the new stock quantity.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    /// Product title
    pub title: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Price in minor units
    pub price: u64,

    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,

    /// Free-form specifications
    #[serde(default = "empty_object")]
    pub specifications: serde_json::Value,

    /// Merchant activation toggle
    pub is_active: bool,

    /// Units in stock
    pub stock_quantity: u32,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            price: request.price,
            images: request.images,
            specifications: request.specifications,
            is_active: request.is_active,
            stock_quantity: request.stock_quantity,
        }
    }
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .update_product(
            ProductUuid::from_uuid(product.into_inner()),
            json.into_inner().into(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
