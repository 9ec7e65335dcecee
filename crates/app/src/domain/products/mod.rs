//! Products

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub(crate) use repository::PgProductsRepository;

pub use errors::ProductsServiceError;
pub use service::*;
