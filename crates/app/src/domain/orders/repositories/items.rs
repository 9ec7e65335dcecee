//! Order Items Repository

use std::str::FromStr;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    decode::{try_get_amount, try_get_json, try_get_quantity},
    domain::{
        orders::{
            models::{NewOrderItem, OrderItem, OrderItemUuid, OrderUuid},
            status::FulfillmentStatus,
        },
        products::models::ProductUuid,
    },
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");
const GET_ORDER_ITEM_SQL: &str = include_str!("../sql/get_order_item.sql");
const UPDATE_ITEM_FULFILLMENT_SQL: &str = include_str!("../sql/update_item_fulfillment.sql");
const CANCEL_ORDER_ITEMS_SQL: &str = include_str!("../sql/cancel_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: OrderItemUuid,
        order: OrderUuid,
        new: &NewOrderItem,
    ) -> Result<OrderItem, sqlx::Error> {
        query_as::<Postgres, OrderItem>(CREATE_ORDER_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(order.into_uuid())
            .bind(new.product.into_uuid())
            .bind(&new.title)
            .bind(&new.sku)
            .bind(&new.description)
            .bind(
                serde_json::to_value(&new.images)
                    .map_err(|e| sqlx::Error::Encode(Box::new(e)))?,
            )
            .bind(&new.specifications)
            .bind(i32::try_from(new.quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))?)
            .bind(i64::try_from(new.unit_price).map_err(|e| sqlx::Error::Encode(Box::new(e)))?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        query_as::<Postgres, OrderItem>(GET_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: OrderItemUuid,
    ) -> Result<Option<OrderItem>, sqlx::Error> {
        query_as::<Postgres, OrderItem>(GET_ORDER_ITEM_SQL)
            .bind(order.into_uuid())
            .bind(item.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_item_fulfillment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: OrderItemUuid,
        fulfilled_quantity: u32,
        status: FulfillmentStatus,
    ) -> Result<Option<OrderItem>, sqlx::Error> {
        query_as::<Postgres, OrderItem>(UPDATE_ITEM_FULFILLMENT_SQL)
            .bind(order.into_uuid())
            .bind(item.into_uuid())
            .bind(
                i32::try_from(fulfilled_quantity)
                    .map_err(|e| sqlx::Error::Encode(Box::new(e)))?,
            )
            .bind(status.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Mark every line cancelled when the parent order is cancelled.
    pub(crate) async fn cancel_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CANCEL_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let fulfillment_status_str: String = row.try_get("fulfillment_status")?;

        let fulfillment_status =
            FulfillmentStatus::from_str(&fulfillment_status_str).map_err(|e| {
                sqlx::Error::ColumnDecode {
                    index: "fulfillment_status".to_string(),
                    source: Box::new(e),
                }
            })?;

        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            title: row.try_get("title")?,
            sku: row.try_get("sku")?,
            description: row.try_get("description")?,
            images: try_get_json(row, "images")?,
            specifications: row.try_get("specifications")?,
            quantity: try_get_quantity(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            fulfilled_quantity: try_get_quantity(row, "fulfilled_quantity")?,
            fulfillment_status,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
