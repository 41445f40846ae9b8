//! Concurrent saves from separate connections serialize at the engine.

use std::thread;

use liteorm::{Client, Model};

#[derive(Debug, Clone, PartialEq, Model)]
struct Entry {
    id: i64,
    label: String,
}

const WRITERS: usize = 4;
const SAVES_PER_WRITER: usize = 10;

#[test]
fn test_concurrent_saves_never_collide_on_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("concurrent.db");

    let client = Client::open(&path).unwrap();
    client
        .connection()
        .execute_batch(
            "create table entries (
                id integer primary key autoincrement,
                label text not null
            )",
        )
        .unwrap();
    drop(client);

    let mut handles = Vec::new();
    for writer in 0..WRITERS {
        let path = path.clone();
        handles.push(thread::spawn(move || {
            let mut client = Client::open(&path).unwrap();
            let mut ids = Vec::new();
            for n in 0..SAVES_PER_WRITER {
                let mut entry = Entry {
                    id: 0,
                    label: format!("writer-{writer}-{n}"),
                };
                client.save(&mut entry).unwrap();
                ids.push(entry.id);
            }
            ids
        }));
    }

    let mut all_ids: Vec<i64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    all_ids.sort_unstable();
    all_ids.dedup();
    assert_eq!(all_ids.len(), WRITERS * SAVES_PER_WRITER);

    let mut client = Client::open(&path).unwrap();
    let rows: Vec<Entry> = client.all().unwrap();
    assert_eq!(rows.len(), WRITERS * SAVES_PER_WRITER);
}
