use std::fs;

use statik::config::{Config, Settings};
use statik::http::mime::MimeTable;
use statik::http::response::{NOT_FOUND_CONTENT_TYPE, StatusCode};
use statik::static_files::{self, ResolveError, resolve};
use tempfile::{TempDir, tempdir};

fn site() -> TempDir {
    let root = tempdir().unwrap();
    fs::write(root.path().join("index.html"), "<h1>hi</h1>").unwrap();
    fs::create_dir(root.path().join("docs")).unwrap();
    fs::write(root.path().join("docs").join("guide.txt"), "read me").unwrap();
    root
}

fn config(root: &TempDir) -> Config {
    let settings = Settings {
        root_path: root.path().to_path_buf(),
        ..Settings::default()
    };
    let mime_types: MimeTable = [("txt", "text/plain")].into_iter().collect();
    Config::new(settings, mime_types)
}

#[tokio::test]
async fn test_resolve_root_to_default_document() {
    let root = site();
    let path = resolve(root.path(), "index.html", "/").await.unwrap();
    assert_eq!(path, root.path().join("index.html"));
}

#[tokio::test]
async fn test_resolve_nested_file() {
    let root = site();
    let path = resolve(root.path(), "index.html", "/docs/guide.txt").await.unwrap();
    assert_eq!(path, root.path().join("docs").join("guide.txt"));
}

#[tokio::test]
async fn test_resolve_without_leading_slash() {
    let root = site();
    assert!(resolve(root.path(), "index.html", "index.html").await.is_ok());
}

#[tokio::test]
async fn test_resolve_missing_file() {
    let root = site();
    assert_eq!(
        resolve(root.path(), "index.html", "/missing.txt").await,
        Err(ResolveError::NotFound)
    );
}

#[tokio::test]
async fn test_resolve_directory_is_not_a_file() {
    let root = site();
    assert_eq!(
        resolve(root.path(), "index.html", "/docs").await,
        Err(ResolveError::NotFound)
    );
}

#[tokio::test]
async fn test_resolve_missing_default_document() {
    let root = site();
    assert_eq!(
        resolve(root.path(), "home.html", "/").await,
        Err(ResolveError::NotFound)
    );
}

#[tokio::test]
async fn test_resolve_rejects_traversal() {
    let outer = tempdir().unwrap();
    let root = outer.path().join("www");
    fs::create_dir(&root).unwrap();
    fs::write(outer.path().join("secret.txt"), "nope").unwrap();

    assert_eq!(
        resolve(&root, "index.html", "/../secret.txt").await,
        Err(ResolveError::OutsideRoot)
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_resolve_rejects_symlink_out_of_root() {
    let outer = tempdir().unwrap();
    let root = outer.path().join("www");
    fs::create_dir(&root).unwrap();
    fs::write(outer.path().join("secret.txt"), "nope").unwrap();
    std::os::unix::fs::symlink(outer.path().join("secret.txt"), root.join("link.txt")).unwrap();

    assert_eq!(
        resolve(&root, "index.html", "/link.txt").await,
        Err(ResolveError::OutsideRoot)
    );
}

#[tokio::test]
async fn test_get_serves_file_with_mime_type() {
    let root = site();
    let response = static_files::get(&config(&root), "/docs/guide.txt").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type.as_deref(), Some("text/plain"));
    assert_eq!(&response.body[..], b"read me");
}

#[tokio::test]
async fn test_get_default_document_uses_default_mime_type() {
    let root = site();
    let response = static_files::get(&config(&root), "/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type.as_deref(), Some("text/html"));
    assert_eq!(response.content_length(), 11);
}

#[tokio::test]
async fn test_get_missing_file_is_404() {
    let root = site();
    let response = static_files::get(&config(&root), "/nope.txt").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.content_type.as_deref(), Some(NOT_FOUND_CONTENT_TYPE));
    assert_eq!(response.content_length(), 0);
}

#[tokio::test]
async fn test_get_empty_file() {
    let root = site();
    fs::write(root.path().join("empty.txt"), "").unwrap();

    let response = static_files::get(&config(&root), "/empty.txt").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.is_empty());
}
