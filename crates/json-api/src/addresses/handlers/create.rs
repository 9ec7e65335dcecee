//! Create Address Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::addresses::models::NewAddress;

use crate::{
    addresses::{errors::into_status_error, responses::AddressResponse},
    extensions::*,
    state::State,
};

/// Create Address Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateAddressRequest {
    pub first_name: String,
    pub last_name: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: Option<String>,

    /// Whether this address may be shipped to
    #[serde(default = "default_true")]
    pub can_ship: bool,

    /// Whether this address may be billed to
    #[serde(default = "default_true")]
    pub can_bill: bool,
}

fn default_true() -> bool {
    true
}

impl From<CreateAddressRequest> for NewAddress {
    fn from(request: CreateAddressRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            line1: request.line1,
            line2: request.line2,
            city: request.city,
            state: request.state,
            postal_code: request.postal_code,
            country: request.country,
            phone: request.phone,
            can_ship: request.can_ship,
            can_bill: request.can_bill,
        }
    }
}

/// Create Address Handler
#[endpoint(
    tags("addresses"),
    summary = "Create Address",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Address created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateAddressRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AddressResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let address = state
        .app
        .addresses
        .create_address(customer, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let uuid = address.uuid;

    res.add_header(LOCATION, format!("/addresses/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(address.into()))
}
