//! Built-in chain handlers.

use std::sync::Arc;
use std::time::Duration;
use log::{debug, warn};
use tokio::time;

use crate::chain::handler::{ChainFlow, ChainFuture, ChainHandlerFn};
use crate::server::StatusCode;

/// `/status/<code>`: set the response status code.
///
/// A value that does not parse as an in-range HTTP status code is logged and
/// replaced with 200, so the rest of the chain still runs.
pub fn status_handler() -> ChainHandlerFn {
    Arc::new(|hop, response| -> ChainFuture {
        Box::pin(async move {
            let status = match hop.value.parse::<u16>() {
                Ok(code) if (100..=599).contains(&code) => StatusCode::new(code),
                Ok(code) => {
                    warn!("status value {code} outside 100-599, using 200");
                    StatusCode::OK
                }
                Err(e) => {
                    warn!("invalid status value {value:?}: {e}", value = hop.value);
                    StatusCode::OK
                }
            };
            debug!("status {code}", code = status.as_u16());
            Ok(ChainFlow::Continue(response.with_status(status)))
        })
    })
}

/// `/delay/<seconds>`: sleep before the next hop runs.
///
/// Suspends only this request's task; the registry lock was released when the
/// lookup completed, before the handler was invoked. A value that does not
/// parse is logged and treated as zero, and zero skips the timer entirely.
pub fn delay_handler() -> ChainHandlerFn {
    Arc::new(|hop, response| -> ChainFuture {
        Box::pin(async move {
            let seconds = match hop.value.parse::<u64>() {
                Ok(seconds) => seconds,
                Err(e) => {
                    warn!("invalid delay value {value:?}: {e}", value = hop.value);
                    0
                }
            };
            debug!("delay {seconds}s");
            if seconds > 0 {
                time::sleep(Duration::from_secs(seconds)).await;
            }
            Ok(ChainFlow::Continue(response))
        })
    })
}
