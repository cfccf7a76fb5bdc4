//! The chain engine: walks a request path pair by pair.

use std::sync::Arc;
use log::debug;

use crate::chain::handler::{ChainFlow, Hop};
use crate::chain::path::{chain_segments, pair_at};
use crate::chain::registry::HandlerRegistry;
use crate::parser::HttpRequest;
use crate::server::{Error, HttpResponse, StatusCode};

/// Drives the sequence of handler invocations for one request.
///
/// The dispatcher itself holds no per-request state: the chain position lives
/// on the stack of a single [`dispatch`](ChainDispatcher::dispatch) call, so
/// concurrent requests cannot observe each other's progress. The registry is
/// the only shared resource.
pub struct ChainDispatcher {
    registry: Arc<HandlerRegistry>,
}

impl ChainDispatcher {
    /// Create a dispatcher resolving segment names against `registry`.
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this dispatcher resolves segment names against.
    pub fn registry(&self) -> &Arc<HandlerRegistry> {
        &self.registry
    }

    /// Handle one request: segment the path, then invoke the handler for
    /// each recognized key/value pair in path order.
    ///
    /// Hop `i + 1` starts only after hop `i` returns; no handler runs twice,
    /// none is skipped once selected. The chain ends at the first missing,
    /// unregistered, or value-less key, and whatever the handlers have built
    /// by then is the response. A path with no usable first pair gets the
    /// root fallback: 200 with body `OK`.
    pub async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        let request = Arc::new(request);
        let segments = chain_segments(&request.path);

        let Some((first_key, first_value)) = pair_at(&segments, 0) else {
            return Ok(root_fallback());
        };
        if first_key.is_empty() {
            return Ok(root_fallback());
        }
        let Some(first_handler) = self.registry.lookup(first_key).await else {
            debug!("no handler for first segment {first_key:?}, serving root fallback");
            return Ok(root_fallback());
        };

        let mut position = 0;
        let mut key = first_key.to_string();
        let mut value = first_value.to_string();
        let mut handler = first_handler;
        let mut response = HttpResponse::new(StatusCode::OK);

        loop {
            debug!("chain hop {position}: {key}={value}");
            let hop = Hop {
                key,
                value,
                position,
                request: Arc::clone(&request),
            };
            response = match (handler)(hop, response).await? {
                ChainFlow::Continue(response) => response,
                ChainFlow::Final(response) => return Ok(response),
            };

            // The next pair's offset derives from the number of pairs already
            // consumed; see chain::path::pair_at.
            let Some((next_key, next_value)) = pair_at(&segments, position + 1) else {
                break;
            };
            let Some(next_handler) = self.registry.lookup(next_key).await else {
                debug!("no handler for segment {next_key:?}, ending chain");
                break;
            };
            position += 1;
            key = next_key.to_string();
            value = next_value.to_string();
            handler = next_handler;
        }

        Ok(response)
    }
}

/// The fixed response served when the path requests no chain: an empty first
/// segment, an unregistered first key, or no first pair at all.
fn root_fallback() -> HttpResponse {
    HttpResponse::new(StatusCode::OK)
        .with_content_type("text/plain")
        .with_body_string("OK")
}
