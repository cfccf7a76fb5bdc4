//! The shared name-to-handler mapping.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use log::debug;
use tokio::sync::RwLock;

use crate::chain::builtin;
use crate::chain::handler::{ChainFlow, ChainFuture, ChainHandlerFn, Hop};
use crate::server::{Error, HttpResponse};

/// Maps path segment names to chain handlers.
///
/// The registry is the only state shared across concurrent requests. Any
/// number of lookups may proceed together; a registration excludes all
/// lookups and other registrations for the duration of one map insert.
pub struct HandlerRegistry {
    handlers: RwLock<HashMap<String, ChainHandlerFn>>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry pre-populated with the built-in handlers:
    /// `status` and `delay`.
    pub fn with_defaults() -> Self {
        let mut handlers: HashMap<String, ChainHandlerFn> = HashMap::new();
        handlers.insert("status".to_string(), builtin::status_handler());
        handlers.insert("delay".to_string(), builtin::delay_handler());
        Self {
            handlers: RwLock::new(handlers),
        }
    }

    /// Register a handler for a path segment name.
    ///
    /// Re-registering a name replaces the previous handler. Safe to call
    /// while requests are in flight: a dispatch running concurrently sees
    /// either the old entry or the new one, never a partial map.
    pub async fn register<F, Fut>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(Hop, HttpResponse) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ChainFlow, Error>> + Send + 'static,
    {
        let name = name.into();
        let handler: ChainHandlerFn =
            Arc::new(move |hop, response| -> ChainFuture { Box::pin(handler(hop, response)) });

        debug!("registering chain handler for segment {name:?}");
        self.handlers.write().await.insert(name, handler);
    }

    /// Look up the handler registered for a segment name.
    ///
    /// Absence is an expected outcome (end of chain, unknown entry point),
    /// not an error. The returned handler is a clone of the stored `Arc`;
    /// the registry lock is released before the caller invokes it, so a
    /// slow handler never holds up registrations.
    pub async fn lookup(&self, name: &str) -> Option<ChainHandlerFn> {
        self.handlers.read().await.get(name).cloned()
    }

    /// Names of all registered segments, sorted, for startup listings.
    pub async fn segment_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.read().await.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for HandlerRegistry {
    /// The default registry carries the built-in handlers, mirroring
    /// [`HandlerRegistry::with_defaults`]. Use [`HandlerRegistry::new`] for
    /// an explicitly empty one.
    fn default() -> Self {
        Self::with_defaults()
    }
}
