//! Update Order Status Handler

use std::{str::FromStr, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::{
    models::{OrderUuid, StatusUpdate},
    status::OrderStatus,
};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusRequest {
    /// Target status
    pub status: String,

    /// Carrier tracking number, stored on transition to shipped
    pub tracking_number: Option<String>,

    /// Carrier name
    pub carrier: Option<String>,

    /// Staff notes to record with the transition
    pub notes: Option<String>,
}

impl TryFrom<UpdateStatusRequest> for StatusUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateStatusRequest) -> Result<Self, Self::Error> {
        let status = OrderStatus::from_str(&request.status).map_err(|_| {
            StatusError::bad_request().brief(format!("Unknown order status {}", request.status))
        })?;

        Ok(Self {
            status,
            tracking_number: request.tracking_number,
            carrier: request.carrier,
            notes: request.notes,
        })
    }
}

/// Update Order Status Handler
///
/// Applies a privileged transition on the order status state machine.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Transition not permitted"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let update = StatusUpdate::try_from(json.into_inner())?;

    let order = state
        .app
        .orders
        .update_status(OrderUuid::from_uuid(order.into_inner()), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
