//! Address resolution for checkout.
//!
//! Saved and inline addresses both normalise into the [`OrderAddress`]
//! snapshot shape before checkout persists anything.

use sqlx::{Postgres, Transaction};

use crate::domain::{
    addresses::{
        errors::AddressResolutionError,
        models::{AddressSelector, AddressUse, InlineAddress, OrderAddress},
        repository::PgAddressesRepository,
    },
    customers::models::CustomerUuid,
};

/// Resolve a checkout address selector into the canonical snapshot shape.
///
/// A saved address must belong to the customer and carry the eligibility
/// flag for the requested use; an inline address must be complete.
pub(crate) async fn resolve_order_address(
    tx: &mut Transaction<'_, Postgres>,
    repository: &PgAddressesRepository,
    customer: CustomerUuid,
    selector: &AddressSelector,
    usage: AddressUse,
) -> Result<OrderAddress, AddressResolutionError> {
    match selector {
        AddressSelector::Saved(address_uuid) => {
            let address = repository
                .get_address(tx, customer, *address_uuid)
                .await?
                .ok_or(AddressResolutionError::NotFound)?;

            let eligible = match usage {
                AddressUse::Shipping => address.can_ship,
                AddressUse::Billing => address.can_bill,
            };

            if !eligible {
                return Err(AddressResolutionError::Ineligible { usage });
            }

            Ok(address.into())
        }
        AddressSelector::Inline(inline) => inline_order_address(inline),
    }
}

fn inline_order_address(inline: &InlineAddress) -> Result<OrderAddress, AddressResolutionError> {
    Ok(OrderAddress {
        first_name: required(&inline.first_name, "first_name")?,
        last_name: required(&inline.last_name, "last_name")?,
        line1: required(&inline.line1, "line1")?,
        line2: optional(&inline.line2),
        city: required(&inline.city, "city")?,
        state: required(&inline.state, "state")?,
        postal_code: required(&inline.postal_code, "postal_code")?,
        country: required(&inline.country, "country")?,
        phone: optional(&inline.phone),
    })
}

fn required(
    value: &Option<String>,
    field: &'static str,
) -> Result<String, AddressResolutionError> {
    match value.as_deref().map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => Err(AddressResolutionError::Incomplete { field }),
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(ToString::to_string)
}
