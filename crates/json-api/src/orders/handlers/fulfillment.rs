//! Update Order Item Fulfillment Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::models::{OrderItemUuid, OrderUuid};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderItemResponse},
    state::State,
};

/// Update Fulfillment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateFulfillmentRequest {
    /// Units shipped so far; never more than the ordered quantity
    pub fulfilled_quantity: u32,
}

/// Update Order Item Fulfillment Handler
///
/// Records fulfillment progress on a single order line.
#[endpoint(
    tags("orders"),
    summary = "Update Order Item Fulfillment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Fulfillment updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Quantity exceeds the ordered amount"),
        (status_code = StatusCode::NOT_FOUND, description = "Order line not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    item: PathParam<Uuid>,
    json: JsonBody<UpdateFulfillmentRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let item = state
        .app
        .orders
        .update_item_fulfillment(
            OrderUuid::from_uuid(order.into_inner()),
            OrderItemUuid::from_uuid(item.into_inner()),
            json.into_inner().fulfilled_quantity,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
