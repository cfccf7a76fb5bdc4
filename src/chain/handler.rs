//! Chain handler types.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::parser::HttpRequest;
use crate::server::{Error, HttpResponse};

/// One key/value pair of a request's chain, handed to the handler it selects.
///
/// The position is threaded explicitly from hop to hop by the dispatcher;
/// handlers can read it but never have to maintain it.
#[derive(Debug, Clone)]
pub struct Hop {
    /// The path segment that selected this handler.
    pub key: String,
    /// The segment following the key, interpreted only by the handler.
    pub value: String,
    /// Zero-based count of hops already completed for this request.
    pub position: usize,
    /// The request this chain belongs to.
    pub request: Arc<HttpRequest>,
}

/// What the chain engine should do after a handler returns.
#[derive(Debug)]
pub enum ChainFlow {
    /// Keep walking the path; the next recognized pair runs against this
    /// response.
    Continue(HttpResponse),
    /// Stop here; this response is final and later pairs are ignored.
    Final(HttpResponse),
}

/// Type alias for a boxed future that resolves to a chain step outcome.
pub type ChainFuture = Pin<Box<dyn Future<Output = Result<ChainFlow, Error>> + Send>>;

/// Type alias for a registered chain handler.
///
/// A handler is anything callable with the hop that selected it and the
/// response built so far. Concrete handlers are registered by name; the
/// dispatcher resolves them with a runtime string from the URL.
pub type ChainHandlerFn = Arc<dyn Fn(Hop, HttpResponse) -> ChainFuture + Send + Sync>;
