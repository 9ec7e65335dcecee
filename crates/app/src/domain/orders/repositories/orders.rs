//! Orders Repository

use std::str::FromStr;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    decode::{try_get_amount, try_get_json},
    domain::{
        addresses::models::OrderAddress,
        customers::models::CustomerUuid,
        orders::{
            models::{NewOrder, Order, OrderUuid},
            status::{OrderStatus, PaymentStatus},
        },
    },
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_CUSTOMER_ORDER_SQL: &str = include_str!("../sql/get_customer_order.sql");
const LIST_CUSTOMER_ORDERS_SQL: &str = include_str!("../sql/list_customer_orders.sql");
const LOCK_ORDER_SQL: &str = include_str!("../sql/lock_order.sql");
const LOCK_CUSTOMER_ORDER_SQL: &str = include_str!("../sql/lock_customer_order.sql");
const APPLY_TRANSITION_SQL: &str = include_str!("../sql/apply_transition.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert an order header. Returns `None` when the generated order
    /// number collided with an existing one; `ON CONFLICT DO NOTHING` keeps
    /// the surrounding transaction usable so the caller can retry with a
    /// fresh number.
    pub(crate) async fn insert_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        number: &str,
        new: &NewOrder,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(number)
            .bind(new.customer.into_uuid())
            .bind(amount_to_i64(new.totals.subtotal)?)
            .bind(amount_to_i64(new.totals.tax)?)
            .bind(amount_to_i64(new.totals.shipping)?)
            .bind(amount_to_i64(new.totals.discount)?)
            .bind(amount_to_i64(new.totals.total)?)
            .bind(json_value(&new.shipping_address)?)
            .bind(json_value(&new.billing_address)?)
            .bind(new.payment_method.as_deref())
            .bind(new.customer_notes.as_deref())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_customer_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(GET_CUSTOMER_ORDER_SQL)
            .bind(customer.into_uuid())
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_customer_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_CUSTOMER_ORDERS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn lock_customer_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LOCK_CUSTOMER_ORDER_SQL)
            .bind(customer.into_uuid())
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Apply an already-validated status transition, stamping the timestamp
    /// column that corresponds to the target status.
    pub(crate) async fn apply_transition(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        target: OrderStatus,
        tracking_number: Option<&str>,
        carrier: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(APPLY_TRANSITION_SQL)
            .bind(order.into_uuid())
            .bind(target.as_str())
            .bind(tracking_number)
            .bind(carrier)
            .bind(notes)
            .fetch_one(&mut **tx)
            .await
    }
}

fn amount_to_i64(amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

fn json_value(address: &OrderAddress) -> Result<serde_json::Value, sqlx::Error> {
    serde_json::to_value(address).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status_str: String = row.try_get("status")?;
        let payment_status_str: String = row.try_get("payment_status")?;

        let status = OrderStatus::from_str(&status_str).map_err(|e| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: Box::new(e),
        })?;

        let payment_status = PaymentStatus::from_str(&payment_status_str).map_err(|e| {
            sqlx::Error::ColumnDecode {
                index: "payment_status".to_string(),
                source: Box::new(e),
            }
        })?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            number: row.try_get("number")?,
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            status,
            payment_status,
            payment_method: row.try_get("payment_method")?,
            subtotal: try_get_amount(row, "subtotal")?,
            tax: try_get_amount(row, "tax")?,
            shipping: try_get_amount(row, "shipping")?,
            discount: try_get_amount(row, "discount")?,
            total: try_get_amount(row, "total")?,
            currency: row.try_get("currency")?,
            shipping_address: try_get_json(row, "shipping_address")?,
            billing_address: try_get_json(row, "billing_address")?,
            customer_notes: row.try_get("customer_notes")?,
            admin_notes: row.try_get("admin_notes")?,
            tracking_number: row.try_get("tracking_number")?,
            carrier: row.try_get("carrier")?,
            confirmed_at: row
                .try_get::<Option<SqlxTimestamp>, _>("confirmed_at")?
                .map(SqlxTimestamp::to_jiff),
            shipped_at: row
                .try_get::<Option<SqlxTimestamp>, _>("shipped_at")?
                .map(SqlxTimestamp::to_jiff),
            delivered_at: row
                .try_get::<Option<SqlxTimestamp>, _>("delivered_at")?
                .map(SqlxTimestamp::to_jiff),
            cancelled_at: row
                .try_get::<Option<SqlxTimestamp>, _>("cancelled_at")?
                .map(SqlxTimestamp::to_jiff),
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
