//! Shape sentinels are detected before any SQL is built.
//!
//! No tables exist in these databases; a sentinel (rather than a "no such
//! table" execution error) proves the database was never touched.

use chrono::{DateTime, Utc};
use liteorm::{Client, Model, OrmError, OrmResult, Row, SqlParam};

// ── Hand-written descriptors with deliberate defects ─────────────────────────

#[derive(Debug)]
struct NoId {
    name: String,
}

impl Model for NoId {
    const TABLE: &'static str = "no_ids";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn id(&self) -> i64 {
        0
    }

    fn set_id(&mut self, _id: i64) {}

    fn from_row(row: &Row<'_>) -> OrmResult<Self> {
        Ok(Self {
            name: row.get(0).map_err(|e| OrmError::scan("name", e))?,
        })
    }

    fn values(&self) -> Vec<SqlParam> {
        vec![Box::new(self.name.clone())]
    }
}

#[derive(Debug)]
struct BadColumn {
    id: i64,
}

impl Model for BadColumn {
    const TABLE: &'static str = "bad_columns";
    const COLUMNS: &'static [&'static str] = &["id", "drop table; --"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> OrmResult<Self> {
        Ok(Self {
            id: row.get(0).map_err(|e| OrmError::scan("id", e))?,
        })
    }

    fn values(&self) -> Vec<SqlParam> {
        vec![Box::new(self.id), Box::new(0i64)]
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_id_field_on_find() {
    let mut client = Client::open_in_memory().unwrap();
    let err = client.find::<NoId, _>([]).unwrap_err();
    assert!(err.is_missing_id_field());
}

#[test]
fn test_missing_id_field_on_save() {
    let mut client = Client::open_in_memory().unwrap();
    let mut m = NoId {
        name: "x".into(),
    };
    let err = client.save(&mut m).unwrap_err();
    assert!(err.is_missing_id_field());
}

#[test]
fn test_invalid_descriptor_on_find_all() {
    let mut client = Client::open_in_memory().unwrap();
    let err = client.find_all::<BadColumn, _>([]).unwrap_err();
    assert!(err.is_invalid_model());
}

#[test]
fn test_invalid_descriptor_on_save() {
    let mut client = Client::open_in_memory().unwrap();
    let mut m = BadColumn { id: 0 };
    let err = client.save(&mut m).unwrap_err();
    assert!(err.is_invalid_model());
}

#[test]
fn test_sentinels_are_returned_verbatim() {
    let mut client = Client::open_in_memory().unwrap();
    let err = client.find::<NoId, _>([]).unwrap_err();
    assert!(matches!(err, OrmError::MissingIdField));

    let err = client.find::<BadColumn, _>([]).unwrap_err();
    assert!(matches!(err, OrmError::InvalidModel(_)));
}

#[test]
fn test_managed_setter_defaults_are_noops() {
    let mut m = NoId {
        name: "x".into(),
    };
    m.set_created_at(DateTime::<Utc>::UNIX_EPOCH);
    m.set_updated_at(DateTime::<Utc>::UNIX_EPOCH);
    assert_eq!(m.name, "x");
}
