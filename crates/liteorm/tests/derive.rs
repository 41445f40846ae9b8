//! Derived descriptor contents: naming, overrides, managed-field flags.

use liteorm::{Model, validate};

#[derive(Model)]
#[allow(non_snake_case)]
struct HTTPServer {
    id: i64,
    hostURL: String,
}

#[derive(Model)]
#[orm(table = "people")]
struct Person {
    id: i64,
    #[orm(column = "full_name")]
    name: String,
}

#[derive(Model)]
struct FeedItem {
    id: i64,
    title: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

#[test]
fn test_table_name_is_pluralized_snake_case() {
    assert_eq!(HTTPServer::TABLE, "http_servers");
    assert_eq!(FeedItem::TABLE, "feed_items");
}

#[test]
fn test_column_names_follow_declaration_order() {
    assert_eq!(HTTPServer::COLUMNS, &["id", "host_url"]);
    assert_eq!(
        FeedItem::COLUMNS,
        &["id", "title", "created_at", "updated_at"]
    );
}

#[test]
fn test_attribute_overrides() {
    assert_eq!(Person::TABLE, "people");
    assert_eq!(Person::COLUMNS, &["id", "full_name"]);
}

#[test]
fn test_managed_field_flags() {
    assert!(!HTTPServer::HAS_CREATED_AT);
    assert!(!HTTPServer::HAS_UPDATED_AT);
    assert!(FeedItem::HAS_CREATED_AT);
    assert!(FeedItem::HAS_UPDATED_AT);
}

#[test]
fn test_derived_descriptors_validate() {
    assert!(validate::<HTTPServer>().is_ok());
    assert!(validate::<Person>().is_ok());
    assert!(validate::<FeedItem>().is_ok());
}

#[test]
fn test_id_accessors() {
    let mut s = HTTPServer {
        id: 0,
        hostURL: "http://localhost".into(),
    };
    assert_eq!(s.id(), 0);
    s.set_id(7);
    assert_eq!(s.id(), 7);
}

#[test]
fn test_values_align_with_columns() {
    let p = Person {
        id: 1,
        name: "ada".into(),
    };
    assert_eq!(p.values().len(), Person::COLUMNS.len());
}
