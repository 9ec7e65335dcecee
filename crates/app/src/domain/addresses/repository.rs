//! Addresses Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    addresses::models::{Address, AddressUuid, NewAddress},
    customers::models::CustomerUuid,
};

const LIST_ADDRESSES_SQL: &str = include_str!("sql/list_addresses.sql");
const GET_ADDRESS_SQL: &str = include_str!("sql/get_address.sql");
const CREATE_ADDRESS_SQL: &str = include_str!("sql/create_address.sql");
const DELETE_ADDRESS_SQL: &str = include_str!("sql/delete_address.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAddressesRepository;

impl PgAddressesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_addresses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<Address>, sqlx::Error> {
        query_as::<Postgres, Address>(LIST_ADDRESSES_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        address: AddressUuid,
    ) -> Result<Option<Address>, sqlx::Error> {
        query_as::<Postgres, Address>(GET_ADDRESS_SQL)
            .bind(customer.into_uuid())
            .bind(address.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        address: AddressUuid,
        new: &NewAddress,
    ) -> Result<Address, sqlx::Error> {
        query_as::<Postgres, Address>(CREATE_ADDRESS_SQL)
            .bind(address.into_uuid())
            .bind(customer.into_uuid())
            .bind(&new.first_name)
            .bind(&new.last_name)
            .bind(&new.line1)
            .bind(new.line2.as_deref())
            .bind(&new.city)
            .bind(&new.state)
            .bind(&new.postal_code)
            .bind(&new.country)
            .bind(new.phone.as_deref())
            .bind(new.can_ship)
            .bind(new.can_bill)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        address: AddressUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ADDRESS_SQL)
            .bind(customer.into_uuid())
            .bind(address.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Address {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AddressUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            line1: row.try_get("line1")?,
            line2: row.try_get("line2")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            postal_code: row.try_get("postal_code")?,
            country: row.try_get("country")?,
            phone: row.try_get("phone")?,
            can_ship: row.try_get("can_ship")?,
            can_bill: row.try_get("can_bill")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
