//! A minimal HTTP server that chains handlers from URL path segments.
//!
//! The request path is read as an ordered list of key/value segment pairs:
//! `/status/206/delay/2` means "run the `status` handler with `206`, then the
//! `delay` handler with `2`". Handlers are looked up by name in a shared
//! registry and invoked strictly left to right; the chain ends at the first
//! segment with no registered handler.
//!
//! # Features
//!
//! - Chain dispatch: one request triggers a sequence of named actions
//! - Concurrent-safe handler registry, including registration at runtime
//! - Built-in `status` and `delay` handlers
//! - Async handlers with explicit chain-position threading
//! - Minimal HTTP/1.x request parsing and a small TCP server
//!
//! # Examples
//!
//! ## Dispatching a chain
//!
//! ```
//! use std::sync::Arc;
//! use chainhttp_rs::{ChainDispatcher, HandlerRegistry, parse_request};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let registry = Arc::new(HandlerRegistry::with_defaults());
//!     let dispatcher = ChainDispatcher::new(registry);
//!
//!     let request = parse_request(
//!         b"GET /status/206 HTTP/1.1\r\nHost: example.com\r\n\r\n",
//!     ).unwrap();
//!
//!     let response = dispatcher.dispatch(request).await.unwrap();
//!     assert_eq!(response.status.as_u16(), 206);
//! }
//! ```
//!
//! ## Registering a custom handler
//!
//! ```
//! use std::sync::Arc;
//! use chainhttp_rs::{ChainDispatcher, ChainFlow, HandlerRegistry, parse_request};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let registry = Arc::new(HandlerRegistry::new());
//!     registry.register("hello", |hop, response| async move {
//!         Ok(ChainFlow::Continue(
//!             response.with_body_string(format!("hello, {}", hop.value)),
//!         ))
//!     }).await;
//!
//!     let dispatcher = ChainDispatcher::new(registry);
//!     let request = parse_request(
//!         b"GET /hello/world HTTP/1.1\r\nHost: example.com\r\n\r\n",
//!     ).unwrap();
//!
//!     let response = dispatcher.dispatch(request).await.unwrap();
//!     assert_eq!(response.body, b"hello, world");
//! }
//! ```
//!
//! ## Running the server
//!
//! ```no_run
//! use std::sync::Arc;
//! use chainhttp_rs::{ChainDispatcher, HandlerRegistry, HttpServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Arc::new(HandlerRegistry::with_defaults());
//!     let server = HttpServer::new(
//!         ServerConfig::default(),
//!         ChainDispatcher::new(registry),
//!     );
//!     server.start().await?;
//!     Ok(())
//! }
//! ```
//!
//! Paths that request no chain (`/`, or a first segment with no registered
//! handler) are answered with HTTP 200 and the body `OK`.

// Export the parser module
pub mod parser;

// Export the chain module
pub mod chain;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use chain::{ChainDispatcher, ChainFlow, ChainHandlerFn, HandlerRegistry, Hop};
pub use parser::{Error as ParserError, HttpRequest, HttpVersion, Method, parse_request};
pub use server::{Error as ServerError, HttpResponse, HttpServer, ServerConfig, StatusCode};
