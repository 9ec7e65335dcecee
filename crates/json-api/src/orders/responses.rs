//! Order response DTOs shared by the order handlers.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::{
    addresses::models::OrderAddress,
    orders::models::{Order, OrderItem},
};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// Human-facing order number
    pub number: String,

    /// Order lifecycle status
    pub status: String,

    /// Payment progress
    pub payment_status: String,

    /// Payment method label
    pub payment_method: Option<String>,

    /// Sum of line prices, in minor units
    pub subtotal: u64,

    /// Tax, in minor units
    pub tax: u64,

    /// Shipping, in minor units
    pub shipping: u64,

    /// Discount, in minor units
    pub discount: u64,

    /// Grand total, in minor units
    pub total: u64,

    /// Currency code
    pub currency: String,

    /// Shipping address snapshot
    pub shipping_address: OrderAddressResponse,

    /// Billing address snapshot
    pub billing_address: OrderAddressResponse,

    /// Free-text notes from the customer
    pub customer_notes: Option<String>,

    /// Notes recorded by staff
    pub admin_notes: Option<String>,

    /// Carrier tracking number
    pub tracking_number: Option<String>,

    /// Carrier name
    pub carrier: Option<String>,

    /// When the order was confirmed
    pub confirmed_at: Option<String>,

    /// When the order was shipped
    pub shipped_at: Option<String>,

    /// When the order was delivered
    pub delivered_at: Option<String>,

    /// When the order was cancelled
    pub cancelled_at: Option<String>,

    /// The order lines
    pub items: Vec<OrderItemResponse>,

    /// The date and time the order was created
    pub created_at: String,

    /// The date and time the order was last updated
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            number: order.number,
            status: order.status.to_string(),
            payment_status: order.payment_status.to_string(),
            payment_method: order.payment_method,
            subtotal: order.subtotal,
            tax: order.tax,
            shipping: order.shipping,
            discount: order.discount,
            total: order.total,
            currency: order.currency,
            shipping_address: order.shipping_address.into(),
            billing_address: order.billing_address.into(),
            customer_notes: order.customer_notes,
            admin_notes: order.admin_notes,
            tracking_number: order.tracking_number,
            carrier: order.carrier,
            confirmed_at: order.confirmed_at.map(|at| at.to_string()),
            shipped_at: order.shipped_at.map(|at| at.to_string()),
            delivered_at: order.delivered_at.map(|at| at.to_string()),
            cancelled_at: order.cancelled_at.map(|at| at.to_string()),
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    /// The unique identifier of the order line
    pub uuid: Uuid,

    /// The product this line snapshotted
    pub product_uuid: Uuid,

    /// Product title at checkout time
    pub title: String,

    /// Product SKU at checkout time
    pub sku: String,

    /// Product description at checkout time
    pub description: String,

    /// Product images at checkout time
    pub images: Vec<String>,

    /// Product specifications at checkout time
    pub specifications: serde_json::Value,

    /// Ordered quantity
    pub quantity: u32,

    /// Unit price at checkout time, in minor units
    pub unit_price: u64,

    /// Units shipped so far
    pub fulfilled_quantity: u32,

    /// Per-line fulfillment status
    pub fulfillment_status: String,

    /// The date and time the line was created
    pub created_at: String,

    /// The date and time the line was last updated
    pub updated_at: String,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            title: item.title,
            sku: item.sku,
            description: item.description,
            images: item.images,
            specifications: item.specifications,
            quantity: item.quantity,
            unit_price: item.unit_price,
            fulfilled_quantity: item.fulfilled_quantity,
            fulfillment_status: item.fulfillment_status.to_string(),
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

/// Order Address Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderAddressResponse {
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

impl From<OrderAddress> for OrderAddressResponse {
    fn from(address: OrderAddress) -> Self {
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
