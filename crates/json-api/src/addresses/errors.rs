//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::addresses::AddressesServiceError;

pub(crate) fn into_status_error(error: AddressesServiceError) -> StatusError {
    match error {
        AddressesServiceError::InvalidReference
        | AddressesServiceError::MissingRequiredData
        | AddressesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid address payload")
        }
        AddressesServiceError::NotFound => StatusError::not_found().brief("Address not found"),
        AddressesServiceError::Sql(source) => {
            error!("address storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
