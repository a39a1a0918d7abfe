//! Statik - minimal static file server
//!
//! Core library for configuration, HTTP handling and file serving.

pub mod config;
pub mod http;
pub mod server;
pub mod static_files;
