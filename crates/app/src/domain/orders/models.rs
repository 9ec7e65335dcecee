//! Order Models

use jiff::Timestamp;

use crate::{
    domain::{
        addresses::models::{AddressSelector, OrderAddress},
        carts::models::CartItem,
        customers::models::CustomerUuid,
        orders::{
            status::{FulfillmentStatus, OrderStatus, PaymentStatus},
            totals::OrderTotals,
        },
        products::models::{Product, ProductUuid},
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Model
///
/// Created exactly once by checkout. The monetary fields, addresses, and
/// notes are immutable from then on; only the status fields, tracking
/// details, and admin notes change, through the state machine.
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: OrderUuid,
    pub number: String,
    pub customer_uuid: CustomerUuid,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub subtotal: u64,
    pub tax: u64,
    pub shipping: u64,
    pub discount: u64,
    pub total: u64,
    pub currency: String,
    pub shipping_address: OrderAddress,
    pub billing_address: OrderAddress,
    pub customer_notes: Option<String>,
    pub admin_notes: Option<String>,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub confirmed_at: Option<Timestamp>,
    pub shipped_at: Option<Timestamp>,
    pub delivered_at: Option<Timestamp>,
    pub cancelled_at: Option<Timestamp>,
    pub items: Vec<OrderItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItem>;

/// OrderItem Model
///
/// A frozen snapshot of the product at checkout time, so later catalog edits
/// never alter historical orders. Only the fulfillment fields mutate.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub uuid: OrderItemUuid,
    pub product_uuid: ProductUuid,
    pub title: String,
    pub sku: String,
    pub description: String,
    pub images: Vec<String>,
    pub specifications: serde_json::Value,
    pub quantity: u32,
    pub unit_price: u64,
    pub fulfilled_quantity: u32,
    pub fulfillment_status: FulfillmentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Checkout instructions.
///
/// Billing falls back to the shipping address when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub shipping: AddressSelector,
    pub billing: Option<AddressSelector>,
    pub payment_method: Option<String>,
    pub customer_notes: Option<String>,
}

/// A privileged status change.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub status: OrderStatus,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub notes: Option<String>,
}

/// Order header fields assembled by checkout before insertion.
#[derive(Debug, Clone)]
pub(crate) struct NewOrder {
    pub(crate) customer: CustomerUuid,
    pub(crate) totals: OrderTotals,
    pub(crate) shipping_address: OrderAddress,
    pub(crate) billing_address: OrderAddress,
    pub(crate) payment_method: Option<String>,
    pub(crate) customer_notes: Option<String>,
}

/// Line snapshot assembled by checkout before insertion.
#[derive(Debug, Clone)]
pub(crate) struct NewOrderItem {
    pub(crate) product: ProductUuid,
    pub(crate) title: String,
    pub(crate) sku: String,
    pub(crate) description: String,
    pub(crate) images: Vec<String>,
    pub(crate) specifications: serde_json::Value,
    pub(crate) quantity: u32,
    pub(crate) unit_price: u64,
}

impl NewOrderItem {
    /// Freeze a cart line against the product it was validated against. The
    /// unit price is the cart's captured price, not the live one.
    pub(crate) fn snapshot(product: &Product, item: &CartItem) -> Self {
        Self {
            product: product.uuid,
            title: product.title.clone(),
            sku: product.sku.clone(),
            description: product.description.clone(),
            images: product.images.clone(),
            specifications: product.specifications.clone(),
            quantity: item.quantity,
            unit_price: item.price,
        }
    }
}
