//! # liteorm
//!
//! A lightweight SQLite-only data mapper for Rust.
//!
//! ## Features
//!
//! - **Derived mapping**: table and column names come from type and field
//!   names via `#[derive(Model)]`; rows scan back positionally
//! - **Composable clauses**: `where_` / `in_list` / `order_by` / `limit` and
//!   friends are pure text+argument fragments, combined by concatenation
//! - **Transactional**: every operation runs in its own transaction; upsert's
//!   existence check and write share one transaction
//! - **Managed timestamps**: `created_at` / `updated_at` fields are owned by
//!   the mapper, stamped with a single injected time per operation
//! - **Uniform errors**: shape sentinels are returned verbatim; execution
//!   failures are wrapped with the phase that failed
//!
//! ## Example
//!
//! ```ignore
//! use liteorm::{Client, Model, in_list, limit, order_by, where_};
//!
//! #[derive(Model)]
//! struct Post {
//!     id: i64,
//!     title: String,
//!     created_at: chrono::DateTime<chrono::Utc>,
//!     updated_at: chrono::DateTime<chrono::Utc>,
//! }
//!
//! let mut client = Client::open("app.db")?;
//!
//! // Insert (id == 0), then update (id != 0) via the same call.
//! let mut post = Post {
//!     id: 0,
//!     title: "hello".into(),
//!     created_at: chrono::DateTime::UNIX_EPOCH,
//!     updated_at: chrono::DateTime::UNIX_EPOCH,
//! };
//! client.save(&mut post)?;
//!
//! let recent: Vec<Post> = client.find_all([
//!     where_("title = ?").bind("hello"),
//!     order_by("created_at desc"),
//!     limit(10),
//! ])?;
//! # Ok::<(), liteorm::OrmError>(())
//! ```

pub mod clause;
pub mod client;
pub mod error;
mod exec;
pub mod model;
pub mod query;

pub use clause::{
    Clause, SqlParam, group_by, in_list, inner_join, left_join, limit, order_by, select, union,
    where_, wrap,
};
pub use client::Client;
pub use error::{OrmError, OrmResult};
pub use model::{
    CREATED_AT_COLUMN, ID_COLUMN, Model, UPDATED_AT_COLUMN, fields_excluding, validate,
};
pub use query::Query;

// Re-exports used by derive-generated code
pub use chrono;
pub use rusqlite::Row;

#[cfg(feature = "derive")]
pub use liteorm_derive::Model;
