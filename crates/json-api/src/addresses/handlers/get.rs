//! Get Address Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::domain::addresses::models::AddressUuid;

use crate::{
    addresses::{errors::into_status_error, responses::AddressResponse},
    extensions::*,
    state::State,
};

/// Get Address Handler
#[endpoint(
    tags("addresses"),
    summary = "Get Address",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    address: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<AddressResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let address = state
        .app
        .addresses
        .get_address(customer, AddressUuid::from_uuid(address.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(address.into()))
}
