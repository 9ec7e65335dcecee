//! Addresses

pub mod errors;
pub mod models;
mod repository;
pub mod resolver;
pub mod service;

pub(crate) use repository::PgAddressesRepository;

pub use errors::{AddressResolutionError, AddressesServiceError};
pub use service::*;
