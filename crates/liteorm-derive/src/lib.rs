//! Derive macros for liteorm
//!
//! Provides the `#[derive(Model)]` macro.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod model;
mod naming;
mod sql_ident;

/// Derive the `Model` trait for a struct.
///
/// Table and column names are derived from the type and field names
/// (snake_case, table names pluralized with a trailing `s`).
///
/// # Example
///
/// ```ignore
/// use liteorm::Model;
///
/// #[derive(Model)]
/// struct Post {
///     id: i64,
///     title: String,
///     created_at: chrono::DateTime<chrono::Utc>,
///     updated_at: chrono::DateTime<chrono::Utc>,
/// }
///
/// assert_eq!(Post::TABLE, "posts");
/// ```
///
/// # Requirements
///
/// - The struct must declare an `id` field (64-bit integer); its absence is
///   a compile error.
/// - Fields named `created_at` / `updated_at` (if present) are managed by
///   the mapper: it sets `created_at` once at first insert and refreshes
///   `updated_at` on every insert and update.
///
/// # Attributes
///
/// - `#[orm(table = "name")]` - Override the derived table name
/// - `#[orm(column = "name")]` - Map a field to a different column name
#[proc_macro_derive(Model, attributes(orm))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    model::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
