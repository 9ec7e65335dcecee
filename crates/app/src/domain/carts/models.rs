//! Cart Models

use jiff::Timestamp;

use crate::{
    domain::{customers::models::CustomerUuid, products::models::ProductUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// Cart Model
///
/// One cart per customer, created lazily on first access. Lines are cleared
/// by checkout; the cart row itself survives.
#[derive(Debug, Clone)]
pub struct Cart {
    pub uuid: CartUuid,
    pub customer_uuid: CustomerUuid,
    pub items: Vec<CartItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItem>;

/// CartItem Model
///
/// `price` is captured when the product is first added and may diverge from
/// the product's live price.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New CartItem Model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewCartItem {
    pub product: ProductUuid,
    pub quantity: u32,
}
