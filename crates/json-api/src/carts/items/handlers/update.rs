//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::CartItemUuid;

use crate::{
    carts::{errors::into_status_error, responses::CartItemResponse},
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// New quantity, replacing the current one
    pub quantity: u32,
}

/// Update Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let item = state
        .app
        .carts
        .update_item(
            customer,
            CartItemUuid::from_uuid(item.into_inner()),
            json.into_inner().quantity,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        products::models::ProductUuid,
    };

    use crate::test_helpers::{TEST_CUSTOMER, carts_service, make_cart_item};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/items/{item}").put(handler))
    }

    #[tokio::test]
    async fn test_update_item_returns_200() -> TestResult {
        let mut item = make_cart_item(ProductUuid::now_v7(), 5, 10_00);
        let uuid = item.uuid;

        item.quantity = 5;

        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .withf(move |customer, item, quantity| {
                *customer == TEST_CUSTOMER.customer && *item == uuid && *quantity == 5
            })
            .return_once(move |_, _, _| Ok(item));

        let mut res = TestClient::put(format!("http://example.com/cart/items/{uuid}"))
            .json(&json!({ "quantity": 5 }))
            .send(&make_service(carts))
            .await;

        let body: CartItemResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.quantity, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_item_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::NotFound));

        let res = TestClient::put(format!(
            "http://example.com/cart/items/{}",
            Uuid::now_v7()
        ))
        .json(&json!({ "quantity": 2 }))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
