//! Order endpoints

pub(crate) mod errors;
mod handlers;
pub(crate) mod responses;

pub(crate) use handlers::{cancel, checkout, fulfillment, get, index, status};
