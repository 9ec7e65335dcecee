//! Orders service errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::{
    addresses::{errors::AddressResolutionError, models::AddressUse},
    carts::validation::CartIssue,
    orders::status::OrderStatus,
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("cart failed validation")]
    InvalidCart { issues: Vec<CartIssue> },

    #[error("address not found")]
    AddressNotFound,

    #[error("address is not eligible for {usage} use")]
    AddressIneligible { usage: AddressUse },

    #[error("address is missing required field {field}")]
    AddressIncomplete { field: &'static str },

    #[error("customer not found or inactive")]
    CustomerNotFound,

    #[error("order not found")]
    NotFound,

    #[error("cannot transition order from {from} to {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("order in status {status} cannot be cancelled")]
    NotCancellable { status: OrderStatus },

    #[error("fulfilled quantity {requested} exceeds ordered quantity {ordered}")]
    InvalidFulfillmentQuantity { requested: u32, ordered: u32 },

    #[error("could not allocate a unique order number")]
    OrderNumberExhausted,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}

impl From<AddressResolutionError> for OrdersServiceError {
    fn from(error: AddressResolutionError) -> Self {
        match error {
            AddressResolutionError::NotFound => Self::AddressNotFound,
            AddressResolutionError::Ineligible { usage } => Self::AddressIneligible { usage },
            AddressResolutionError::Incomplete { field } => Self::AddressIncomplete { field },
            AddressResolutionError::Sql(source) => Self::Sql(source),
        }
    }
}
