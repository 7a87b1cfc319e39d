//! staticd - a minimal HTTP/1.x static file server.
//!
//! Core library: connection dispatch, keep-alive sessions, message framing.

pub mod config;
pub mod http;
pub mod server;
