//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        OrdersServiceError::InvalidCart { issues } => {
            let details: Vec<String> = issues.iter().map(|issue| issue.message()).collect();

            StatusError::bad_request()
                .brief(format!("Cart failed validation: {}", details.join("; ")))
        }
        OrdersServiceError::AddressNotFound => {
            StatusError::not_found().brief("Address not found")
        }
        OrdersServiceError::AddressIneligible { usage } => StatusError::bad_request()
            .brief(format!("Address is not eligible for {usage} use")),
        OrdersServiceError::AddressIncomplete { field } => StatusError::bad_request()
            .brief(format!("Address is missing required field {field}")),
        OrdersServiceError::CustomerNotFound => {
            StatusError::forbidden().brief("Customer is not active")
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::InvalidTransition { from, to } => StatusError::bad_request()
            .brief(format!("Cannot transition order from {from} to {to}")),
        OrdersServiceError::NotCancellable { status } => StatusError::bad_request()
            .brief(format!("Order in status {status} cannot be cancelled")),
        OrdersServiceError::InvalidFulfillmentQuantity { requested, ordered } => {
            StatusError::bad_request().brief(format!(
                "Fulfilled quantity {requested} exceeds ordered quantity {ordered}"
            ))
        }
        OrdersServiceError::OrderNumberExhausted => {
            error!("order number generation exhausted its retry budget");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
