// tests/dir_source.rs
//
// DirSource over a scratch directory of listing files.
//
use std::fs;
use std::path::Path;

use vehicle_feed::source::{DirSource, DocumentSource};
use vehicle_feed::FeedError;

fn write(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

fn seeded() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path();
    write(p, "20_truck.json", r#"{"id": 20, "title": "2012 Ford F-150", "content": "<p>VIN 1FTFW1ET5CFA12345</p>",
        "attachments": ["https://cdn.example/f150.jpg"]}"#);
    write(p, "10_sedan.json", r#"{"id": 10, "title": "2017 Honda Accord", "content": "<p>Mileage 40000</p>"}"#);
    write(p, "30_draft.json", r#"{"id": 30, "title": "Draft", "status": "draft"}"#);
    write(p, "40_menu.json", r#"{"id": 40, "title": "Menu", "kind": "nav_menu_item"}"#);
    write(p, "50_broken.json", "{ not json");
    write(p, "notes.txt", "ignored");
    dir
}

#[test]
fn lists_published_listings_in_name_order() {
    let dir = seeded();
    let src = DirSource::new(dir.path());
    let ids: Vec<u64> = src.list_documents().unwrap().iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![10, 20]);
}

#[test]
fn attachments_follow_listing() {
    let dir = seeded();
    let src = DirSource::new(dir.path());
    src.list_documents().unwrap();

    assert_eq!(src.attached_images(20).unwrap(), vec!["https://cdn.example/f150.jpg"]);
    assert!(src.attached_images(10).unwrap().is_empty());
    assert!(matches!(src.attached_images(30), Err(FeedError::Source(_))));
}

#[test]
fn empty_dir_is_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    assert!(DirSource::new(dir.path()).list_documents().unwrap().is_empty());
}
