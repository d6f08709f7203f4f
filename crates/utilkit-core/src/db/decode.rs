//! Per-backend conversion of driver rows into [`Row`] / [`Value`].
//!
//! Each backend reports its own type names; the value is decoded with the
//! Rust type that matches the name. Date and time values become
//! [`Value::Text`] in their usual textual form.

use std::sync::Arc;

use sqlx::mysql::MySqlRow;
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use sqlx::types::chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::types::JsonValue;
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

use super::error::DbError;
use super::types::{Row, Value};

/// Decode every row with `value`, sharing one column-name list.
pub(super) fn rows<R>(rows: &[R], value: fn(&R, usize) -> Option<Value>) -> Result<Vec<Row>, DbError>
where
    R: sqlx::Row,
{
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };
    let columns: Arc<[String]> = first
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    rows.iter()
        .map(|row| {
            let values = (0..columns.len())
                .map(|i| {
                    value(row, i).ok_or_else(|| DbError::Decode {
                        column: columns[i].clone(),
                        type_name: row.columns()[i].type_info().name().to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Row::new(Arc::clone(&columns), values))
        })
        .collect()
}

/// Sqlite values carry their storage class; the declared column type only
/// matters to tell booleans from integers.
pub(super) fn sqlite_value(row: &SqliteRow, idx: usize) -> Option<Value> {
    let raw = row.try_get_raw(idx).ok()?;
    if raw.is_null() {
        return Some(Value::Null);
    }
    let stored = raw.type_info().name().to_ascii_uppercase();
    let declared = row.column(idx).type_info().name().to_ascii_uppercase();
    match stored.as_str() {
        "INTEGER" | "BOOLEAN" | "NUMERIC" => {
            let n = row.try_get_unchecked::<i64, _>(idx).ok()?;
            if declared == "BOOLEAN" || stored == "BOOLEAN" {
                Some(Value::Bool(n != 0))
            } else {
                Some(Value::Int(n))
            }
        }
        "REAL" => row.try_get_unchecked::<f64, _>(idx).ok().map(Value::Float),
        "BLOB" => row.try_get_unchecked::<Vec<u8>, _>(idx).ok().map(Value::Bytes),
        // TEXT, plus DATE / TIME / DATETIME stored as text
        _ => row.try_get_unchecked::<String, _>(idx).ok().map(Value::Text),
    }
}

pub(super) fn postgres_value(row: &PgRow, idx: usize) -> Option<Value> {
    let raw = row.try_get_raw(idx).ok()?;
    if raw.is_null() {
        return Some(Value::Null);
    }
    let name = raw.type_info().name().to_ascii_uppercase();
    let value = match name.as_str() {
        "BOOL" => Value::Bool(row.try_get(idx).ok()?),
        "INT2" => Value::Int(row.try_get::<i16, _>(idx).ok()?.into()),
        "INT4" => Value::Int(row.try_get::<i32, _>(idx).ok()?.into()),
        "INT8" => Value::Int(row.try_get(idx).ok()?),
        "FLOAT4" => Value::Float(row.try_get::<f32, _>(idx).ok()?.into()),
        "FLOAT8" => Value::Float(row.try_get(idx).ok()?),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" | "CITEXT" => Value::Text(row.try_get(idx).ok()?),
        "BYTEA" => Value::Bytes(row.try_get(idx).ok()?),
        "DATE" => Value::Text(row.try_get::<NaiveDate, _>(idx).ok()?.to_string()),
        "TIME" => Value::Text(row.try_get::<NaiveTime, _>(idx).ok()?.to_string()),
        "TIMESTAMP" => Value::Text(row.try_get::<NaiveDateTime, _>(idx).ok()?.to_string()),
        "TIMESTAMPTZ" => Value::Text(row.try_get::<DateTime<Utc>, _>(idx).ok()?.to_rfc3339()),
        "JSON" | "JSONB" => Value::Text(row.try_get::<JsonValue, _>(idx).ok()?.to_string()),
        _ => return None,
    };
    Some(value)
}

pub(super) fn mysql_value(row: &MySqlRow, idx: usize) -> Option<Value> {
    let raw = row.try_get_raw(idx).ok()?;
    if raw.is_null() {
        return Some(Value::Null);
    }
    let name = raw.type_info().name().to_ascii_uppercase();
    let value = match name.as_str() {
        "BOOLEAN" => Value::Bool(row.try_get(idx).ok()?),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => Value::Int(row.try_get(idx).ok()?),
        n if n.ends_with(" UNSIGNED") => {
            let n = row.try_get::<u64, _>(idx).ok()?;
            i64::try_from(n).map_or_else(|_| Value::Text(n.to_string()), Value::Int)
        }
        "FLOAT" => Value::Float(row.try_get::<f32, _>(idx).ok()?.into()),
        "DOUBLE" => Value::Float(row.try_get(idx).ok()?),
        "VARCHAR" | "CHAR" | "TEXT" | "ENUM" | "SET" => Value::Text(row.try_get(idx).ok()?),
        "BLOB" | "VARBINARY" | "BINARY" => Value::Bytes(row.try_get(idx).ok()?),
        "DATE" => Value::Text(row.try_get::<NaiveDate, _>(idx).ok()?.to_string()),
        "TIME" => Value::Text(row.try_get::<NaiveTime, _>(idx).ok()?.to_string()),
        "DATETIME" => Value::Text(row.try_get::<NaiveDateTime, _>(idx).ok()?.to_string()),
        "TIMESTAMP" => Value::Text(row.try_get::<DateTime<Utc>, _>(idx).ok()?.to_rfc3339()),
        "JSON" => Value::Text(row.try_get::<JsonValue, _>(idx).ok()?.to_string()),
        _ => return None,
    };
    Some(value)
}
