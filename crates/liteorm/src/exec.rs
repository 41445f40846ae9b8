//! Transactional execution engine.
//!
//! Every top-level operation runs inside exactly one transaction: begin,
//! prepare, execute, scan, commit. The first failure at any step rolls the
//! transaction back and propagates the error wrapped with the phase that
//! failed.
//! Upsert's existence check and its chosen insert/update share the same
//! transaction, so no other writer can interleave between check and write.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use tracing::debug;

use crate::error::{OrmError, OrmResult};
use crate::model::{Model, validate};
use crate::query::Query;

/// Run a single-row select; zero rows is [`OrmError::NotFound`].
pub(crate) fn fetch_one<T: Model>(conn: &mut Connection, query: &Query) -> OrmResult<T> {
    let tx = begin(conn)?;
    let result = fetch_one_in_tx(&tx, query);
    finish(tx, result)
}

/// Run a multi-row select; one new instance per row, in engine order.
pub(crate) fn fetch_all<T: Model>(conn: &mut Connection, query: &Query) -> OrmResult<Vec<T>> {
    let tx = begin(conn)?;
    let result = fetch_all_in_tx(&tx, query);
    finish(tx, result)
}

/// Insert-or-update keyed on the model's current id, in one transaction.
///
/// On success the engine-assigned id (for inserts) and the injected `now`
/// are written back into the caller's model, so callers observe the same
/// timestamp that was persisted.
pub(crate) fn save<T: Model>(
    conn: &mut Connection,
    model: &mut T,
    now: DateTime<Utc>,
) -> OrmResult<()> {
    validate::<T>()?;
    let tx = begin_write(conn)?;
    let result = save_in_tx(&tx, model, now);
    match finish(tx, result)? {
        SaveOutcome::Inserted(id) => {
            model.set_id(id);
            model.set_created_at(now);
            model.set_updated_at(now);
        }
        SaveOutcome::Updated => model.set_updated_at(now),
    }
    Ok(())
}

enum SaveOutcome {
    Inserted(i64),
    Updated,
}

fn begin(conn: &mut Connection) -> OrmResult<Transaction<'_>> {
    conn.transaction().map_err(OrmError::Begin)
}

/// Writes take the write lock up front (`begin immediate`) so the upsert
/// existence check cannot race a concurrent writer's not-yet-committed
/// insert; contending writers block at the engine level instead of failing
/// on lock upgrade.
fn begin_write(conn: &mut Connection) -> OrmResult<Transaction<'_>> {
    conn.transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(OrmError::Begin)
}

/// Commit on `Ok`, roll back on `Err`; a rollback failure is folded into
/// the reported error.
fn finish<T>(tx: Transaction<'_>, result: OrmResult<T>) -> OrmResult<T> {
    match result {
        Ok(value) => {
            tx.commit().map_err(OrmError::Commit)?;
            Ok(value)
        }
        Err(error) => match tx.rollback() {
            Ok(()) => Err(error),
            Err(rollback_err) => Err(OrmError::Other(format!(
                "{error} (rollback failed: {rollback_err})"
            ))),
        },
    }
}

fn fetch_one_in_tx<T: Model>(tx: &Transaction<'_>, query: &Query) -> OrmResult<T> {
    debug!(sql = query.sql(), "fetch one");
    let mut stmt = tx.prepare(query.sql()).map_err(OrmError::Prepare)?;
    let params = query.params();
    let mut rows = stmt.query(&params[..]).map_err(OrmError::Execute)?;
    match rows.next().map_err(OrmError::Execute)? {
        Some(row) => T::from_row(row),
        None => Err(OrmError::NotFound),
    }
}

fn fetch_all_in_tx<T: Model>(tx: &Transaction<'_>, query: &Query) -> OrmResult<Vec<T>> {
    debug!(sql = query.sql(), "fetch all");
    let mut stmt = tx.prepare(query.sql()).map_err(OrmError::Prepare)?;
    let params = query.params();
    let mut rows = stmt.query(&params[..]).map_err(OrmError::Execute)?;
    let mut models = Vec::new();
    while let Some(row) = rows.next().map_err(OrmError::Execute)? {
        models.push(T::from_row(row)?);
    }
    Ok(models)
}

fn save_in_tx<T: Model>(
    tx: &Transaction<'_>,
    model: &T,
    now: DateTime<Utc>,
) -> OrmResult<SaveOutcome> {
    if count_by_id::<T>(tx, model.id())? > 0 {
        let query = Query::update(model, now)?;
        execute_one(tx, &query)?;
        Ok(SaveOutcome::Updated)
    } else {
        let query = Query::insert(model, now)?;
        execute_one(tx, &query)?;
        Ok(SaveOutcome::Inserted(tx.last_insert_rowid()))
    }
}

/// Existence check for upsert; runs inside the operation's transaction.
fn count_by_id<T: Model>(tx: &Transaction<'_>, id: i64) -> OrmResult<i64> {
    let sql = format!("select count(*) from {} where id = ?", T::TABLE);
    debug!(sql = sql.as_str(), "existence check");
    let mut stmt = tx.prepare(&sql).map_err(OrmError::Prepare)?;
    stmt.query_row([id], |row| row.get(0))
        .map_err(OrmError::Execute)
}

/// Execute a write that must affect exactly one row.
fn execute_one(tx: &Transaction<'_>, query: &Query) -> OrmResult<()> {
    debug!(sql = query.sql(), "execute");
    let mut stmt = tx.prepare(query.sql()).map_err(OrmError::Prepare)?;
    let params = query.params();
    let affected = stmt.execute(&params[..]).map_err(OrmError::Execute)?;
    if affected != 1 {
        return Err(OrmError::RowsAffected { got: affected });
    }
    Ok(())
}
