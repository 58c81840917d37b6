//! Content Store Integration Tests
//!
//! Tests for add validation, idempotent removal, and the tag index.

use brainly::domain::{ContentId, ContentType, NewContent, ValidationError};
use brainly::library::{all_tags, ContentStore, Query, SearchOptions};

fn link(title: &str, tags: &[&str]) -> NewContent {
    NewContent::new(ContentType::Link, title)
        .with_link("https://example.com")
        .with_tags(tags.iter().copied())
}

#[test]
fn test_add_requires_link_for_non_documents() {
    let mut store = ContentStore::new();

    for ct in [ContentType::Tweet, ContentType::YouTube, ContentType::Link] {
        let result = store.add(NewContent::new(ct, "Title").with_link("  \t"));
        assert_eq!(result, Err(ValidationError::MissingLink { content_type: ct }));
    }

    assert!(store.is_empty());
}

#[test]
fn test_add_requires_body_for_documents() {
    let mut store = ContentStore::new();

    let result = store.add(
        NewContent::new(ContentType::Document, "Notes").with_link("https://example.com/doc1"),
    );
    assert_eq!(result, Err(ValidationError::MissingBody));

    let item = store
        .add(NewContent::new(ContentType::Document, "Notes").with_body("..."))
        .unwrap();
    assert_eq!(item.body(), Some("..."));
    assert_eq!(item.link(), None);
}

#[test]
fn test_unknown_type_is_validation_error() {
    let result = "podcast".parse::<ContentType>();
    assert_eq!(result, Err(ValidationError::UnknownType("podcast".to_string())));
}

#[test]
fn test_remove_then_query_excludes_item() {
    let mut store = ContentStore::new();
    let a = store.add(link("A", &[])).unwrap();
    store.add(link("B", &[])).unwrap();

    store.remove(a.id);

    let all = store.query(&Query::all(), SearchOptions::default());
    assert!(all.iter().all(|i| i.id != a.id));
    assert_eq!(all.len(), 1);
}

#[test]
fn test_remove_unknown_keeps_length() {
    let mut store = ContentStore::new();
    store.add(link("A", &[])).unwrap();
    store.add(link("B", &[])).unwrap();

    assert!(store.remove(ContentId::new(42)).is_none());
    assert_eq!(store.len(), 2);

    // Removing twice is the same as removing once
    store.remove(ContentId::new(1));
    store.remove(ContentId::new(1));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_tags_are_normalized_on_add() {
    let mut store = ContentStore::new();
    let item = store.add(link("A", &["  a ", "", "a", "b"])).unwrap();

    assert_eq!(item.tags, vec!["a", "b"]);
    assert_eq!(store.all_tags(), vec!["a", "b"]);
}

#[test]
fn test_tag_index_matches_recomputation() {
    let mut store = ContentStore::new();
    let a = store.add(link("A", &["x", "shared"])).unwrap();
    let b = store.add(link("B", &["y", "shared", "x"])).unwrap();
    store.add(link("C", &["z"])).unwrap();
    assert_eq!(store.all_tags(), all_tags(store.list()));

    store.remove(a.id);
    assert_eq!(store.all_tags(), all_tags(store.list()));
    assert_eq!(store.all_tags(), vec!["y", "shared", "x", "z"]);

    store.add(link("D", &["x", "new"])).unwrap();
    store.remove(b.id);
    assert_eq!(store.all_tags(), all_tags(store.list()));
    assert_eq!(store.all_tags(), vec!["z", "x", "new"]);
}

#[test]
fn test_all_tags_are_distinct_and_present() {
    let mut store = ContentStore::new();
    store.add(link("A", &["x", "y"])).unwrap();
    store.add(link("B", &["y", "z"])).unwrap();
    store.add(link("C", &["x"])).unwrap();

    let tags = store.all_tags();
    let mut deduped = tags.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(deduped.len(), tags.len());

    for tag in &tags {
        assert!(store.list().iter().any(|item| item.has_tag(tag)));
    }
}
