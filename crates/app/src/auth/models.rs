//! Auth Models

use jiff::Timestamp;

use crate::{
    domain::customers::models::{CustomerRole, CustomerUuid},
    uuids::TypedUuid,
};

/// API Token UUID
pub type ApiTokenUuid = TypedUuid<ApiToken>;

/// Stored API token metadata. The secret itself is never persisted.
#[derive(Debug, Clone)]
pub struct ApiToken {
    pub uuid: ApiTokenUuid,
    pub customer_uuid: CustomerUuid,
    pub created_at: Timestamp,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// A freshly issued token. `token` is shown exactly once.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub metadata: ApiToken,
    pub token: String,
}

/// The principal resolved by the auth middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedCustomer {
    pub customer: CustomerUuid,
    pub role: CustomerRole,
}
