//! Customers

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub(crate) use repository::PgCustomersRepository;

pub use errors::CustomersServiceError;
pub use service::*;
