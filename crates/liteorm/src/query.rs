//! Per-operation query assembly.
//!
//! A [`Query`] accumulates a base SQL statement plus the arguments of any
//! appended clauses. It is created for one operation, handed to the
//! executor, and discarded. Construction validates the model descriptor
//! first; a malformed descriptor yields its sentinel error and no Query,
//! so partial queries are never returned as usable.

use chrono::{DateTime, Utc};
use rusqlite::types::ToSql;

use crate::clause::{Clause, SqlParam, where_};
use crate::error::{OrmError, OrmResult};
use crate::model::{
    CREATED_AT_COLUMN, ID_COLUMN, Model, UPDATED_AT_COLUMN, fields_excluding, validate,
};

/// Accumulated SQL text and positional arguments for one operation.
pub struct Query {
    sql: String,
    args: Vec<SqlParam>,
}

impl Query {
    fn base(sql: String) -> Self {
        Self {
            sql,
            args: Vec::new(),
        }
    }

    /// Build a single-row select: `select * from <table>` plus clauses.
    pub fn select_one<T, C>(clauses: C) -> OrmResult<Self>
    where
        T: Model,
        C: IntoIterator<Item = Clause>,
    {
        validate::<T>()?;
        let mut query = Self::base(format!("select * from {}", T::TABLE));
        for clause in clauses {
            query.push_clause(clause);
        }
        Ok(query)
    }

    /// Build a multi-row select: same base statement, collection target.
    pub fn select_all<T, C>(clauses: C) -> OrmResult<Self>
    where
        T: Model,
        C: IntoIterator<Item = Clause>,
    {
        Self::select_one::<T, C>(clauses)
    }

    /// Build an insert for `model`.
    ///
    /// `id` and the managed timestamp fields are excluded from the
    /// enumerated fields; `created_at`/`updated_at` columns are then
    /// appended bound to `now` when the model declares them.
    pub fn insert<T: Model>(model: &T, now: DateTime<Utc>) -> OrmResult<Self> {
        validate::<T>()?;
        let (mut columns, mut values) = fields_excluding(
            model,
            &[ID_COLUMN, CREATED_AT_COLUMN, UPDATED_AT_COLUMN],
        );
        if T::HAS_CREATED_AT {
            columns.push(CREATED_AT_COLUMN);
            values.push(Box::new(now));
        }
        if T::HAS_UPDATED_AT {
            columns.push(UPDATED_AT_COLUMN);
            values.push(Box::new(now));
        }

        let mut query = if columns.is_empty() {
            Self::base(format!("insert into {} default values", T::TABLE))
        } else {
            let placeholders = vec!["?"; columns.len()].join(", ");
            Self::base(format!(
                "insert into {} ({}) values ({})",
                T::TABLE,
                columns.join(", "),
                placeholders
            ))
        };
        query.args = values;
        Ok(query)
    }

    /// Build an update for `model`.
    ///
    /// Excludes `id` and `created_at`; includes `updated_at = ?` bound to
    /// `now` when declared; always ends `where id = ?` bound to the model's
    /// current id.
    pub fn update<T: Model>(model: &T, now: DateTime<Utc>) -> OrmResult<Self> {
        validate::<T>()?;
        let (mut columns, mut values) = fields_excluding(
            model,
            &[ID_COLUMN, CREATED_AT_COLUMN, UPDATED_AT_COLUMN],
        );
        if T::HAS_UPDATED_AT {
            columns.push(UPDATED_AT_COLUMN);
            values.push(Box::new(now));
        }
        if columns.is_empty() {
            return Err(OrmError::invalid_model(format!(
                "model '{}' has no updatable columns",
                T::TABLE
            )));
        }

        let assignments = columns
            .iter()
            .map(|c| format!("{c} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut query = Self::base(format!("update {} set {}", T::TABLE, assignments));
        query.args = values;
        query.push_clause(where_("id = ?").bind(model.id()));
        Ok(query)
    }

    /// Append a clause: text joined with a single space, arguments in order.
    pub fn push_clause(&mut self, clause: Clause) {
        let (text, args) = clause.into_parts();
        self.sql.push(' ');
        self.sql.push_str(&text);
        self.args.extend(args);
    }

    /// The accumulated SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Arguments as references compatible with rusqlite.
    pub(crate) fn params(&self) -> Vec<&dyn ToSql> {
        self.args
            .iter()
            .map(|a| {
                let p: &dyn ToSql = a.as_ref();
                p
            })
            .collect()
    }
}

impl std::fmt::Debug for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("sql", &self.sql)
            .field("args", &self.args.len())
            .finish()
    }
}
