//! Chain dispatch: the core of chainhttp-rs.
//!
//! A request path is an alternating sequence of key/value segments. Each key
//! names a handler in the [`HandlerRegistry`]; the [`ChainDispatcher`] walks
//! the pairs left to right, invoking each handler with the response built so
//! far, until the path runs out or a key has no registered handler.

mod registry;
mod dispatch;
mod handler;
mod path;
mod builtin;
mod tests;

// Re-export public items
pub use registry::HandlerRegistry;
pub use dispatch::ChainDispatcher;
pub use handler::{ChainFlow, ChainFuture, ChainHandlerFn, Hop};
pub use path::chain_segments;
pub use builtin::{delay_handler, status_handler};
