//! Composable SQL clause fragments.
//!
//! A [`Clause`] is an immutable pair of SQL text and positional arguments.
//! Clauses never touch the database; they are combined by order-preserving
//! concatenation and appended to a [`Query`](crate::Query) base statement.
//! Values only ever travel as bound `?` parameters, never interpolated into
//! the text.
//!
//! # Example
//!
//! ```ignore
//! use liteorm::{in_list, order_by, where_};
//!
//! let by_name = where_("string = ?").bind("abc");
//! let by_ids = where_("id").append(in_list([1i64, 2, 3]));
//! let newest = order_by("created_at desc");
//! ```

use rusqlite::types::ToSql;

/// A boxed positional SQL argument.
pub type SqlParam = Box<dyn ToSql + Send + Sync>;

/// An immutable SQL text fragment plus its positional arguments.
pub struct Clause {
    text: String,
    args: Vec<SqlParam>,
}

impl Clause {
    /// Create a clause from raw SQL text; bind arguments with [`Clause::bind`].
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            args: Vec::new(),
        }
    }

    /// Bind a positional argument to this clause.
    pub fn bind<T: ToSql + Send + Sync + 'static>(mut self, value: T) -> Self {
        self.args.push(Box::new(value));
        self
    }

    /// Concatenate two clauses: text joined with a single space, argument
    /// lists appended in order.
    pub fn append(mut self, other: Clause) -> Self {
        self.text.push(' ');
        self.text.push_str(&other.text);
        self.args.extend(other.args);
        self
    }

    /// The SQL text of this clause.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The bound arguments of this clause.
    pub fn args(&self) -> &[SqlParam] {
        &self.args
    }

    pub(crate) fn into_parts(self) -> (String, Vec<SqlParam>) {
        (self.text, self.args)
    }
}

impl std::fmt::Debug for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clause")
            .field("text", &self.text)
            .field("args", &self.args.len())
            .finish()
    }
}

/// `where <expr>`; bind the expression's `?` placeholders with [`Clause::bind`].
pub fn where_(expr: &str) -> Clause {
    Clause::new(format!("where {expr}"))
}

/// `in (?, ?, ...)` with one placeholder per value; `in ()` for zero values.
pub fn in_list<T, I>(values: I) -> Clause
where
    T: ToSql + Send + Sync + 'static,
    I: IntoIterator<Item = T>,
{
    let mut args: Vec<SqlParam> = Vec::new();
    let mut placeholders = Vec::new();
    for value in values {
        placeholders.push("?");
        args.push(Box::new(value));
    }
    Clause {
        text: format!("in ({})", placeholders.join(", ")),
        args,
    }
}

/// `group by <expr>`
pub fn group_by(expr: &str) -> Clause {
    Clause::new(format!("group by {expr}"))
}

/// `order by <expr>`
pub fn order_by(expr: &str) -> Clause {
    Clause::new(format!("order by {expr}"))
}

/// `limit ?` with the row count bound as a parameter.
pub fn limit(n: i64) -> Clause {
    Clause::new("limit ?").bind(n)
}

/// `inner join <expr>`
pub fn inner_join(expr: &str) -> Clause {
    Clause::new(format!("inner join {expr}"))
}

/// `left join <expr>`
pub fn left_join(expr: &str) -> Clause {
    Clause::new(format!("left join {expr}"))
}

/// `select <expr>`
pub fn select(expr: &str) -> Clause {
    Clause::new(format!("select {expr}"))
}

/// `union` or `union <modifier>` (e.g. `union("all")`).
pub fn union(modifier: &str) -> Clause {
    if modifier.is_empty() {
        Clause::new("union")
    } else {
        Clause::new(format!("union {modifier}"))
    }
}

/// Parenthesize an existing clause's text, preserving its arguments.
pub fn wrap(clause: Clause) -> Clause {
    let (text, args) = clause.into_parts();
    Clause {
        text: format!("({text})"),
        args,
    }
}
