//! Static file serving
//!
//! Turns a GET request-target into a response: resolve the file under the
//! root directory, read it whole, and pick its Content-Type.

pub mod resolver;

pub use resolver::{ResolveError, local_path, resolve};

use std::path::Path;

use bytes::Bytes;

use crate::config::Config;
use crate::http::mime::mime_type_for;
use crate::http::response::Response;

/// Reads a whole file into memory.
pub async fn read(path: &Path) -> std::io::Result<Bytes> {
    tokio::fs::read(path).await.map(Bytes::from)
}

/// Answers a GET for `target`.
///
/// A missing file gives 404, a file that exists but cannot be read gives 500.
pub async fn get(config: &Config, target: &str) -> Response {
    let settings = &config.settings;

    let path = match resolve(&settings.root_path, &settings.default_document, target).await {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(request_target = %target, reason = ?e, "No file for request target");
            return Response::not_found();
        }
    };

    tracing::info!(file = %path.display(), "Serving file");

    match read(&path).await {
        Ok(bytes) => {
            let content_type =
                mime_type_for(&path, &config.mime_types, &settings.default_mime_type);
            Response::ok(bytes, content_type)
        }
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "Could not read file");
            Response::internal_error()
        }
    }
}
