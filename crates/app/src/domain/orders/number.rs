//! Order number generation.

use jiff::Timestamp;
use rand::{Rng, rngs::OsRng};

/// Order number prefix.
pub const ORDER_NUMBER_PREFIX: &str = "ORD";

/// Attempts at a unique order number before giving up. Collisions require
/// two orders in the same millisecond drawing the same disambiguator, so a
/// small bound is plenty; it exists so a collision is retried rather than
/// surfaced.
pub const MAX_ORDER_NUMBER_ATTEMPTS: u32 = 5;

/// Generate a candidate order number from the current time plus a random
/// disambiguator. Uniqueness is enforced by the insert; callers regenerate
/// on collision up to [`MAX_ORDER_NUMBER_ATTEMPTS`] times.
#[must_use]
pub fn generate_order_number() -> String {
    let millis = Timestamp::now().as_millisecond();
    let disambiguator: u32 = OsRng.gen_range(0..10_000);

    format!("{ORDER_NUMBER_PREFIX}-{millis}{disambiguator:04}")
}
