//! Client facade: the only contract external collaborators consume.
//!
//! A [`Client`] owns one SQLite connection. Every call is synchronous and
//! runs in its own transaction; there is no pooling, retry, or cross-call
//! state. Callers wanting concurrent access open one `Client` per thread
//! against the same database file and let the engine serialize writers.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::clause::Clause;
use crate::error::{OrmError, OrmResult};
use crate::exec;
use crate::model::Model;
use crate::query::Query;

/// Database client exposing the mapper operations.
///
/// # Example
///
/// ```ignore
/// use liteorm::{Client, Model, where_};
///
/// #[derive(Model)]
/// struct Post {
///     id: i64,
///     title: String,
/// }
///
/// let mut client = Client::open("app.db")?;
/// let mut post = Post { id: 0, title: "hello".into() };
/// client.save(&mut post)?;
///
/// let found: Post = client.find([where_("title = ?").bind("hello")])?;
/// # Ok::<(), liteorm::OrmError>(())
/// ```
pub struct Client {
    conn: Connection,
}

impl Client {
    /// Open (creating if needed) a SQLite database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> OrmResult<Self> {
        let conn = Connection::open(path).map_err(OrmError::Connection)?;
        configure(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory SQLite database (for testing).
    pub fn open_in_memory() -> OrmResult<Self> {
        let conn = Connection::open_in_memory().map_err(OrmError::Connection)?;
        configure(&conn)?;
        Ok(Self { conn })
    }

    /// Fetch every row of `T`'s table, in engine-natural order.
    pub fn all<T: Model>(&mut self) -> OrmResult<Vec<T>> {
        let query = Query::select_all::<T, _>(std::iter::empty())?;
        exec::fetch_all(&mut self.conn, &query)
    }

    /// Fetch a single row matching the clauses.
    ///
    /// Returns [`OrmError::NotFound`] if none match.
    pub fn find<T, C>(&mut self, clauses: C) -> OrmResult<T>
    where
        T: Model,
        C: IntoIterator<Item = Clause>,
    {
        let query = Query::select_one::<T, C>(clauses)?;
        exec::fetch_one(&mut self.conn, &query)
    }

    /// Fetch all rows matching the clauses.
    pub fn find_all<T, C>(&mut self, clauses: C) -> OrmResult<Vec<T>>
    where
        T: Model,
        C: IntoIterator<Item = Clause>,
    {
        let query = Query::select_all::<T, C>(clauses)?;
        exec::fetch_all(&mut self.conn, &query)
    }

    /// Insert or update `model`, keyed on its current id.
    ///
    /// A zero id inserts and writes the engine-assigned id back into the
    /// model; managed timestamp fields are stamped with the current time.
    pub fn save<T: Model>(&mut self, model: &mut T) -> OrmResult<()> {
        self.save_at(model, Utc::now())
    }

    /// [`Client::save`] with an explicit timestamp for the managed fields.
    pub fn save_at<T: Model>(&mut self, model: &mut T, now: DateTime<Utc>) -> OrmResult<()> {
        exec::save(&mut self.conn, model, now)
    }

    /// Borrow the underlying connection (e.g. for schema setup).
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Consume the client, returning the underlying connection.
    pub fn into_inner(self) -> Connection {
        self.conn
    }
}

fn configure(conn: &Connection) -> OrmResult<()> {
    conn.pragma_update(None, "foreign_keys", true)
        .map_err(OrmError::Connection)?;
    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(OrmError::Connection)?;
    conn.busy_timeout(Duration::from_secs(5))
        .map_err(OrmError::Connection)?;
    Ok(())
}
