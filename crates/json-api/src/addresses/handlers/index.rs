//! List Addresses Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    addresses::{errors::into_status_error, responses::AddressResponse},
    extensions::*,
    state::State,
};

/// List Addresses Handler
#[endpoint(
    tags("addresses"),
    summary = "List Addresses",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<AddressResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let addresses = state
        .app
        .addresses
        .list_addresses(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(
        addresses.into_iter().map(AddressResponse::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::addresses::MockAddressesService;

    use crate::test_helpers::{TEST_CUSTOMER, addresses_service, make_address};

    use super::*;

    fn make_service(addresses: MockAddressesService) -> Service {
        addresses_service(addresses, Router::with_path("addresses").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_addresses() -> TestResult {
        let address = make_address(true, true);

        let mut addresses = MockAddressesService::new();

        addresses
            .expect_list_addresses()
            .once()
            .withf(|customer| *customer == TEST_CUSTOMER.customer)
            .return_once(move |_| Ok(vec![address]));

        let mut res = TestClient::get("http://example.com/addresses")
            .send(&make_service(addresses))
            .await;

        let body: Vec<AddressResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.len(), 1);
        assert!(body[0].can_ship);

        Ok(())
    }
}
