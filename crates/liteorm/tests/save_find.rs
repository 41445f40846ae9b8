//! End-to-end save/find semantics against an in-memory database.

use liteorm::{Client, Model, where_};

// ── Model definitions ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Model)]
struct Record {
    id: i64,
    flag: bool,
    string: String,
}

fn setup() -> Client {
    let client = Client::open_in_memory().unwrap();
    client
        .connection()
        .execute_batch(
            "create table records (
                id integer primary key autoincrement,
                flag integer not null,
                string text not null
            )",
        )
        .unwrap();
    client
}

fn record(string: &str) -> Record {
    Record {
        id: 0,
        flag: true,
        string: string.into(),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn test_save_assigns_id() {
    let mut client = setup();
    let mut r = record("abc");
    client.save(&mut r).unwrap();
    assert_ne!(r.id, 0);
}

#[test]
fn test_find_roundtrips_saved_fields() {
    let mut client = setup();
    let mut r = record("abc");
    client.save(&mut r).unwrap();

    let found: Record = client.find([where_("id = ?").bind(r.id)]).unwrap();
    assert_eq!(found, r);
}

#[test]
fn test_save_twice_updates_in_place() {
    let mut client = setup();
    let mut r = record("abc");
    client.save(&mut r).unwrap();
    let first_id = r.id;

    r.string = "def".into();
    client.save(&mut r).unwrap();
    assert_eq!(r.id, first_id);

    let rows: Vec<Record> = client.all().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].string, "def");
}

#[test]
fn test_find_no_match_is_not_found() {
    let mut client = setup();
    let err = client
        .find::<Record, _>([where_("id = ?").bind(999i64)])
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_find_all_filters_and_all_preserves_insertion_order() {
    let mut client = setup();
    let mut a = record("abc");
    let mut d = record("def");
    client.save(&mut a).unwrap();
    client.save(&mut d).unwrap();

    let matching: Vec<Record> = client.find_all([where_("string = ?").bind("abc")]).unwrap();
    assert_eq!(matching, vec![a.clone()]);

    let everything: Vec<Record> = client.all().unwrap();
    assert_eq!(everything, vec![a, d]);
}
