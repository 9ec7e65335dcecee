//! Address Models

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{domain::customers::models::CustomerUuid, uuids::TypedUuid};

/// Address UUID
pub type AddressUuid = TypedUuid<Address>;

/// Address Model
///
/// A saved address-book entry. The eligibility flags control which checkout
/// roles the entry may play.
#[derive(Debug, Clone)]
pub struct Address {
    pub uuid: AddressUuid,
    pub customer_uuid: CustomerUuid,
    pub first_name: String,
    pub last_name: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: Option<String>,
    pub can_ship: bool,
    pub can_bill: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// New Address Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub first_name: String,
    pub last_name: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: Option<String>,
    pub can_ship: bool,
    pub can_bill: bool,
}

/// The role an address plays during checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressUse {
    Shipping,
    Billing,
}

impl AddressUse {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shipping => "shipping",
            Self::Billing => "billing",
        }
    }
}

impl fmt::Display for AddressUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A one-off address supplied inline with a checkout request. Every field is
/// optional at this layer; the resolver enforces completeness so missing
/// fields surface as a domain error rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineAddress {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

/// Where checkout should take an address from.
#[derive(Debug, Clone, PartialEq)]
pub enum AddressSelector {
    Saved(AddressUuid),
    Inline(InlineAddress),
}

/// The canonical snapshot shape stored on an order. Saved and inline
/// addresses both normalise into this before checkout persists anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAddress {
    pub first_name: String,
    pub last_name: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: Option<String>,
}

impl From<Address> for OrderAddress {
    fn from(address: Address) -> Self {
        Self {
            first_name: address.first_name,
            last_name: address.last_name,
            line1: address.line1,
            line2: address.line2,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            country: address.country,
            phone: address.phone,
        }
    }
}
