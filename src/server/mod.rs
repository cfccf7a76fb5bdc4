//! HTTP server implementation for chainhttp-rs.
//!
//! This module provides the transport around the chain core: a small TCP
//! accept loop, the response model handlers mutate, and server configuration.

mod response;
mod config;
mod error;
mod http_server;

// Re-export public items
pub use response::{HttpResponse, StatusCode};
pub use config::ServerConfig;
pub use error::Error;
pub use http_server::HttpServer;
