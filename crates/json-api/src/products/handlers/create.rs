//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::models::NewProduct;

use crate::{
    extensions::*,
    products::{errors::into_status_error, responses::ProductResponse},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    /// Product title
    pub title: String,

    /// Stock-keeping unit; must be unique
    pub sku: String,

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

    /// Initial units in stock
    #[serde(default)]
    pub stock_quantity: u32,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        Self {
            title: request.title,
            sku: request.sku,
            description: request.description,
            price: request.price,
            images: request.images,
            specifications: request.specifications,
            stock_quantity: request.stock_quantity,
        }
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "SKU already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .create_product(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let uuid = product.uuid;

    res.add_header(LOCATION, format!("/products/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products").post(handler))
    }

    #[tokio::test]
    async fn test_create_product_returns_201() -> TestResult {
        let product = make_product("SKU-3", 15_00, 3);

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|new| new.sku == "SKU-3" && new.price == 15_00 && new.stock_quantity == 3)
            .return_once(move |_| Ok(product));

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({
                "title": "Product SKU-3",
                "sku": "SKU-3",
                "price": 15_00,
                "stock_quantity": 3,
            }))
            .send(&make_service(products))
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.sku, "SKU-3");

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_sku_returns_409() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "title": "Dup", "sku": "SKU-DUP", "price": 100 }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
