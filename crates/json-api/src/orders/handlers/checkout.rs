//! Checkout Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::{
    addresses::models::{AddressSelector, AddressUuid, InlineAddress},
    orders::models::CheckoutRequest,
};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
    state::State,
};

/// Checkout Request
///
/// Addresses are given either by reference to a saved address-book entry or
/// inline. Billing defaults to the shipping address when absent.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequestBody {
    /// A saved address to ship to
    pub shipping_address_uuid: Option<Uuid>,

    /// A one-off address to ship to
    pub shipping_address: Option<AddressPayload>,

    /// A saved address to bill to
    pub billing_address_uuid: Option<Uuid>,

    /// A one-off address to bill to
    pub billing_address: Option<AddressPayload>,

    /// Payment method label
    pub payment_method: Option<String>,

    /// Free-text notes for the order
    pub customer_notes: Option<String>,
}

/// A one-off address supplied with a checkout request.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

impl From<AddressPayload> for InlineAddress {
    fn from(payload: AddressPayload) -> Self {
        Self {
            first_name: payload.first_name,
            last_name: payload.last_name,
            line1: payload.line1,
            line2: payload.line2,
            city: payload.city,
            state: payload.state,
            postal_code: payload.postal_code,
            country: payload.country,
            phone: payload.phone,
        }
    }
}

fn selector(uuid: Option<Uuid>, inline: Option<AddressPayload>) -> Option<AddressSelector> {
    match (uuid, inline) {
        (Some(uuid), _) => Some(AddressSelector::Saved(AddressUuid::from_uuid(uuid))),
        (None, Some(payload)) => Some(AddressSelector::Inline(payload.into())),
        (None, None) => None,
    }
}

impl TryFrom<CheckoutRequestBody> for CheckoutRequest {
    type Error = StatusError;

    fn try_from(body: CheckoutRequestBody) -> Result<Self, Self::Error> {
        let shipping = selector(body.shipping_address_uuid, body.shipping_address)
            .ok_or_else(|| StatusError::bad_request().brief("A shipping address is required"))?;

        let billing = selector(body.billing_address_uuid, body.billing_address);

        Ok(Self {
            shipping,
            billing,
            payment_method: body.payment_method,
            customer_notes: body.customer_notes,
        })
    }
}

/// Checkout Handler
///
/// Converts the customer's cart into an order in one atomic step: validates
/// every line against live stock, resolves addresses, computes totals,
/// reserves inventory, and empties the cart.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty or invalid cart, or bad address"),
        (status_code = StatusCode::NOT_FOUND, description = "Saved address not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequestBody>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let request = CheckoutRequest::try_from(json.into_inner())?;

    let order = state
        .app
        .orders
        .checkout(customer, request)
        .await
        .map_err(into_status_error)?;

    let uuid = order.uuid;

    res.add_header(LOCATION, format!("/orders/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
