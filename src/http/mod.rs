//! HTTP protocol implementation.
//!
//! This module implements just enough HTTP/1.x to serve files: one request
//! per connection, GET only, `Connection: close` on every response.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection handler implementing the request-response state machine
//! - **`parser`**: Extracts the request line from the single buffer read off the socket
//! - **`request`**: Request line representation
//! - **`response`**: Status codes, reason phrases and the response type
//! - **`writer`**: Frames the header block and writes head and body to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← One read of at most 1024 bytes
//!        └──────┬──────┘
//!               │ Request line parsed (malformed → Closed, nothing written)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← GET → 200/404/500, other methods → 405
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Header block, then body if any
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use statik::config::Config;
//! use statik::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(Config::load(std::env::args().skip(1))?);
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let config = Arc::clone(&config);
//!         tokio::spawn(async move {
//!             if let Err(e) = Connection::new(socket, config).run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
