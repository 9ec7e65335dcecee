//! Cancel Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::models::OrderUuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
    state::State,
};

/// Cancel Order Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CancelOrderRequest {
    /// Why the order is being cancelled
    pub reason: Option<String>,
}

/// Cancel Order Handler
///
/// Cancels one of the calling customer's orders and returns the reserved
/// stock to inventory. Only pending and confirmed orders can be cancelled.
#[endpoint(
    tags("orders"),
    summary = "Cancel Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order cancelled"),
        (status_code = StatusCode::BAD_REQUEST, description = "Order is no longer cancellable"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<CancelOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let order = state
        .app
        .orders
        .cancel_order(
            customer,
            OrderUuid::from_uuid(order.into_inner()),
            json.into_inner().reason,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::orders::{
        MockOrdersService, OrdersServiceError, status::OrderStatus,
    };

    use crate::test_helpers::{TEST_CUSTOMER, make_order, orders_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(
            orders,
            Router::with_path("orders/{order}/cancel").post(handler),
        )
    }

    #[tokio::test]
    async fn test_cancel_returns_200() -> TestResult {
        let mut order = make_order();
        order.status = OrderStatus::Cancelled;
        let uuid = order.uuid;

        let mut orders = MockOrdersService::new();

        orders
            .expect_cancel_order()
            .once()
            .withf(move |customer, order, reason| {
                *customer == TEST_CUSTOMER.customer
                    && *order == uuid
                    && reason.as_deref() == Some("changed my mind")
            })
            .return_once(move |_, _, _| Ok(order));

        let mut res = TestClient::post(format!("http://example.com/orders/{uuid}/cancel"))
            .json(&json!({ "reason": "changed my mind" }))
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "cancelled");

        Ok(())
    }

    #[tokio::test]
    async fn test_not_cancellable_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_cancel_order().once().return_once(|_, _, _| {
            Err(OrdersServiceError::NotCancellable {
                status: OrderStatus::Shipped,
            })
        });

        let res = TestClient::post(format!(
            "http://example.com/orders/{}/cancel",
            Uuid::now_v7()
        ))
        .json(&json!({}))
        .send(&make_service(orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_cancel_order()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::post(format!(
            "http://example.com/orders/{}/cancel",
            Uuid::now_v7()
        ))
        .json(&json!({}))
        .send(&make_service(orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
