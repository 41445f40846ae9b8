//! Model trait and descriptor validation.
//!
//! A model is a struct mapped to one table. The mapping is described by a
//! compile-time descriptor (table name, columns in field declaration order,
//! managed-field flags) normally generated by `#[derive(Model)]`; the
//! original pointer-shape probing is unnecessary here because single and
//! collection targets are distinct Rust types.
//!
//! What the type system cannot check is validated at runtime by
//! [`validate`], before any SQL is built: identifier well-formedness
//! ([`OrmError::InvalidModel`]) and the presence of the `id` column
//! ([`OrmError::MissingIdField`]). Both sentinels are returned verbatim,
//! never wrapped, and short-circuit before any database access.

use chrono::{DateTime, Utc};
use rusqlite::Row;

use crate::clause::SqlParam;
use crate::error::{OrmError, OrmResult};

/// Column name of the engine-assigned primary key every model must declare.
pub const ID_COLUMN: &str = "id";
/// Managed column set once at first insert.
pub const CREATED_AT_COLUMN: &str = "created_at";
/// Managed column refreshed on every insert and update.
pub const UPDATED_AT_COLUMN: &str = "updated_at";

/// Per-type mapping descriptor plus field access.
///
/// Implemented via `#[derive(Model)]`. A hand-written implementation must
/// keep [`Model::COLUMNS`] and [`Model::values`] aligned: same length, same
/// order (field declaration order), and rows are scanned back positionally
/// in that order.
pub trait Model: Sized {
    /// Table name (derived: pluralized snake_case type name).
    const TABLE: &'static str;

    /// Column names in field declaration order, including `id`.
    const COLUMNS: &'static [&'static str];

    /// Whether the model declares a managed `created_at` field.
    const HAS_CREATED_AT: bool = false;

    /// Whether the model declares a managed `updated_at` field.
    const HAS_UPDATED_AT: bool = false;

    /// Current id value; `0` means unassigned.
    fn id(&self) -> i64;

    /// Write back an engine-assigned id.
    fn set_id(&mut self, id: i64);

    /// Write back the insert timestamp. No-op for models without `created_at`.
    fn set_created_at(&mut self, _at: DateTime<Utc>) {}

    /// Write back the update timestamp. No-op for models without `updated_at`.
    fn set_updated_at(&mut self, _at: DateTime<Utc>) {}

    /// Scan a row into a new instance, positionally in declaration order.
    fn from_row(row: &Row<'_>) -> OrmResult<Self>;

    /// Boxed field values in declaration order, aligned with [`Model::COLUMNS`].
    fn values(&self) -> Vec<SqlParam>;
}

/// Validate `T`'s descriptor before building any SQL.
///
/// Returns [`OrmError::InvalidModel`] for an empty table name, malformed
/// identifiers, an empty or duplicate-carrying column list, and
/// [`OrmError::MissingIdField`] when no `id` column is declared.
pub fn validate<T: Model>() -> OrmResult<()> {
    if !is_valid_sql_ident(T::TABLE) {
        return Err(OrmError::invalid_model(format!(
            "table name '{}' is not a valid SQL identifier",
            T::TABLE
        )));
    }
    if T::COLUMNS.is_empty() {
        return Err(OrmError::invalid_model(format!(
            "model '{}' declares no columns",
            T::TABLE
        )));
    }
    for (idx, col) in T::COLUMNS.iter().enumerate() {
        if !is_valid_sql_ident(col) {
            return Err(OrmError::invalid_model(format!(
                "column '{col}' is not a valid SQL identifier"
            )));
        }
        if T::COLUMNS[..idx].contains(col) {
            return Err(OrmError::invalid_model(format!(
                "duplicate column '{col}'"
            )));
        }
    }
    if !T::COLUMNS.contains(&ID_COLUMN) {
        return Err(OrmError::MissingIdField);
    }
    Ok(())
}

/// Enumerate a model's columns and boxed values in declaration order,
/// skipping any column named in `excluded`. Read-only.
pub fn fields_excluding<T: Model>(
    model: &T,
    excluded: &[&str],
) -> (Vec<&'static str>, Vec<SqlParam>) {
    let mut columns = Vec::new();
    let mut values = Vec::new();
    for (column, value) in T::COLUMNS.iter().zip(model.values()) {
        if excluded.contains(column) {
            continue;
        }
        columns.push(*column);
        values.push(value);
    }
    (columns, values)
}

fn is_valid_sql_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
