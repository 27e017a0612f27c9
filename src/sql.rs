//! Pure SQL statement builders.
//!
//! Turns a table name plus optional filter/data maps into SQLite statement
//! text. No execution, no I/O; validation failures surface as
//! [`PrismoError::Validation`] before any transport call is attempted.
//!
//! # Security
//!
//! Values are interpolated as single-quoted literals with NO escaping, for
//! compatibility with the wire format the backend already accepts. A value
//! containing a quote character corrupts the statement. Do not feed
//! untrusted input to these builders. All quoting goes through [`literal`]
//! so a future parameter-binding upgrade is a one-site change.

use serde_json::Value as JsonValue;

use crate::error::{PrismoError, Result};
use crate::models::Row;

/// Default row cap applied when `find_many` is called without a limit.
pub const DEFAULT_LIMIT: u64 = 1000;

/// Build `SELECT * FROM {table} [WHERE ...] LIMIT {limit}`.
///
/// The WHERE clause is present only when a non-empty filter is supplied;
/// `limit` defaults to [`DEFAULT_LIMIT`].
pub fn build_select(table: &str, filter: Option<&Row>, limit: Option<u64>) -> Result<String> {
    require_table(table)?;

    let mut sql = format!("SELECT * FROM {}", table);
    if let Some(filter) = filter {
        if !filter.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conjunction(filter)?);
        }
    }
    sql.push_str(&format!(" LIMIT {}", limit.unwrap_or(DEFAULT_LIMIT)));

    Ok(sql)
}

/// Build `SELECT * FROM {table} WHERE id = '{id}'`.
pub fn build_find_one(table: &str, id: &str) -> Result<String> {
    if table.is_empty() || id.is_empty() {
        return Err(PrismoError::Validation(
            "table name and id are required".into(),
        ));
    }

    Ok(format!("SELECT * FROM {} WHERE id = '{}'", table, id))
}

/// Build `SELECT * FROM {table} WHERE ... LIMIT 1`. The filter is required
/// and must be non-empty.
pub fn build_find_first(table: &str, filter: &Row) -> Result<String> {
    require_table(table)?;
    require_map(filter, "where")?;

    Ok(format!(
        "SELECT * FROM {} WHERE {} LIMIT 1",
        table,
        conjunction(filter)?
    ))
}

/// Build `INSERT INTO {table} (cols...) VALUES ('v1', 'v2', ...)`. The data
/// map is required and must be non-empty; column order follows the map's
/// iteration order and the value list matches it 1:1.
pub fn build_insert(table: &str, data: &Row) -> Result<String> {
    require_table(table)?;
    require_map(data, "data")?;

    let (columns, values) = columns_and_values(data)?;

    Ok(format!(
        "INSERT INTO {} ({}) VALUES ('{}')",
        table,
        columns.join(", "),
        values.join("', '")
    ))
}

/// Build `UPDATE {table} SET col = 'v', ... WHERE ...`. Both maps are
/// required and must be non-empty.
pub fn build_update(table: &str, filter: &Row, data: &Row) -> Result<String> {
    require_table(table)?;
    require_map(filter, "where")?;
    require_map(data, "data")?;

    Ok(format!(
        "UPDATE {} SET {} WHERE {}",
        table,
        pairs(data)?.join(", "),
        conjunction(filter)?
    ))
}

/// Build `DELETE FROM {table} WHERE ...`. The filter is required and must
/// be non-empty.
pub fn build_delete(table: &str, filter: &Row) -> Result<String> {
    require_table(table)?;
    require_map(filter, "where")?;

    Ok(format!(
        "DELETE FROM {} WHERE {}",
        table,
        conjunction(filter)?
    ))
}

/// Render one value as an unquoted literal body (the caller wraps it in
/// single quotes). No escaping is performed; see the module-level security
/// note.
fn literal(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// `col = 'val'` pairs in map-iteration order.
fn pairs(map: &Row) -> Result<Vec<String>> {
    let (columns, values) = columns_and_values(map)?;
    Ok(columns
        .iter()
        .zip(values.iter())
        .map(|(col, val)| format!("{} = '{}'", col, val))
        .collect())
}

/// WHERE-clause conjunction: pairs joined by ` AND `.
fn conjunction(filter: &Row) -> Result<String> {
    Ok(pairs(filter)?.join(" AND "))
}

/// Split a map into parallel column and rendered-value vectors.
///
/// The length check is a structural tautology for map iteration, kept as a
/// sanity assertion: a mismatch indicates an internal bug, not bad caller
/// input.
fn columns_and_values(map: &Row) -> Result<(Vec<&str>, Vec<String>)> {
    let columns: Vec<&str> = map.keys().map(String::as_str).collect();
    let values: Vec<String> = map.values().map(literal).collect();

    if columns.len() != values.len() {
        return Err(PrismoError::Validation(
            "columns and values must have the same length".into(),
        ));
    }

    Ok((columns, values))
}

fn require_table(table: &str) -> Result<()> {
    if table.is_empty() {
        return Err(PrismoError::Validation("table name is required".into()));
    }
    Ok(())
}

fn require_map(map: &Row, what: &str) -> Result<()> {
    if map.is_empty() {
        return Err(PrismoError::Validation(format!(
            "{} object is required and must not be empty",
            what
        )));
    }
    Ok(())
}
