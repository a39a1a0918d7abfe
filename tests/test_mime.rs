use std::collections::HashMap;
use std::fs;
use std::path::Path;

use statik::http::mime::{MimeTable, mime_type_for};
use tempfile::tempdir;

fn table() -> MimeTable {
    let mut map = HashMap::new();
    map.insert("html".to_string(), "text/html; charset=utf-8".to_string());
    map.insert("JS".to_string(), "application/javascript".to_string());
    MimeTable::from_map(map)
}

#[test]
fn test_mime_known_extension() {
    assert_eq!(
        mime_type_for(Path::new("/srv/a.html"), &table(), "text/plain"),
        "text/html; charset=utf-8"
    );
}

#[test]
fn test_mime_extension_case_insensitive() {
    assert_eq!(
        mime_type_for(Path::new("/srv/A.HTML"), &table(), "text/plain"),
        "text/html; charset=utf-8"
    );
    assert_eq!(
        mime_type_for(Path::new("/srv/app.js"), &table(), "text/plain"),
        "application/javascript"
    );
}

#[test]
fn test_mime_uses_last_extension() {
    assert_eq!(
        mime_type_for(Path::new("/srv/bundle.min.js"), &table(), "text/plain"),
        "application/javascript"
    );
    assert_eq!(
        mime_type_for(Path::new("/srv/page.html.bak"), &table(), "text/plain"),
        "text/plain"
    );
}

#[test]
fn test_mime_unknown_or_missing_extension_uses_default() {
    assert_eq!(mime_type_for(Path::new("/srv/x.zip"), &table(), "text/plain"), "text/plain");
    assert_eq!(mime_type_for(Path::new("/srv/Makefile"), &table(), "text/plain"), "text/plain");
}

#[test]
fn test_mime_dot_in_directory_is_not_an_extension() {
    assert_eq!(
        mime_type_for(Path::new("/srv/v1.html/README"), &table(), "text/plain"),
        "text/plain"
    );
}

#[test]
fn test_mime_empty_table_uses_default() {
    let empty = MimeTable::default();
    assert_eq!(mime_type_for(Path::new("a.html"), &empty, "text/html"), "text/html");
}

#[test]
fn test_mime_table_from_yaml_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mime_types.yaml");
    fs::write(&path, "css: text/css\n.SVG: image/svg+xml\n").unwrap();

    let table = MimeTable::from_file(&path).unwrap();

    assert_eq!(table.lookup("css"), Some("text/css"));
    assert_eq!(table.lookup("svg"), Some("image/svg+xml"));
}
