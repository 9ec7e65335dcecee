//! Row decode helpers shared by the repositories.

use serde::de::DeserializeOwned;
use sqlx::{Row, postgres::PgRow};

/// Decode a BIGINT money column into unsigned minor units.
pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Decode an INTEGER quantity column.
pub(crate) fn try_get_quantity(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let quantity_i32: i32 = row.try_get(col)?;

    u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Decode a JSONB column into a typed value.
pub(crate) fn try_get_json<T: DeserializeOwned>(row: &PgRow, col: &str) -> Result<T, sqlx::Error> {
    let value: serde_json::Value = row.try_get(col)?;

    serde_json::from_value(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
