//! Address response DTOs shared by the address handlers.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::addresses::models::Address;

/// Address Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressResponse {
    /// The unique identifier of the address
    pub uuid: Uuid,

    pub first_name: String,
    pub last_name: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: Option<String>,

    /// Whether this address may be shipped to
    pub can_ship: bool,

    /// Whether this address may be billed to
    pub can_bill: bool,

    /// The date and time the address was created
    pub created_at: String,

    /// The date and time the address was last updated
    pub updated_at: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            uuid: address.uuid.into_uuid(),
            first_name: address.first_name,
            last_name: address.last_name,
            line1: address.line1,
            line2: address.line2,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            country: address.country,
            phone: address.phone,
            can_ship: address.can_ship,
            can_bill: address.can_bill,
            created_at: address.created_at.to_string(),
            updated_at: address.updated_at.to_string(),
        }
    }
}
