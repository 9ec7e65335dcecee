//! Auth Repository

use std::str::FromStr;

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    auth::models::{ApiToken, ApiTokenUuid, AuthenticatedCustomer},
    domain::customers::models::{CustomerRole, CustomerUuid},
};

const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const FIND_CUSTOMER_BY_TOKEN_HASH_SQL: &str = include_str!("sql/find_customer_by_token_hash.sql");
const REVOKE_API_TOKEN_SQL: &str = include_str!("sql/revoke_api_token.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAuthRepository;

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_api_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token: ApiTokenUuid,
        customer: CustomerUuid,
        token_hash: &str,
        expires_at: Option<Timestamp>,
    ) -> Result<ApiToken, sqlx::Error> {
        query_as::<Postgres, ApiToken>(CREATE_API_TOKEN_SQL)
            .bind(token.into_uuid())
            .bind(customer.into_uuid())
            .bind(token_hash)
            .bind(expires_at.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_customer_by_token_hash(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_hash: &str,
    ) -> Result<Option<AuthenticatedCustomer>, sqlx::Error> {
        query_as::<Postgres, AuthenticatedCustomer>(FIND_CUSTOMER_BY_TOKEN_HASH_SQL)
            .bind(token_hash)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn revoke_api_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token: ApiTokenUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REVOKE_API_TOKEN_SQL)
            .bind(token.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ApiToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ApiTokenUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for AuthenticatedCustomer {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role_str: String = row.try_get("role")?;

        let role = CustomerRole::from_str(&role_str).map_err(|e| sqlx::Error::ColumnDecode {
            index: "role".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            customer: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            role,
        })
    }
}
