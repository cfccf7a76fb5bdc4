//! chainhttpd: an HTTP server whose URL paths are chains of handler calls.
//!
//! `GET /status/206/delay/2` sets the response status to 206, then sleeps two
//! seconds before the response is written. Any other path whose first segment
//! has no registered handler is answered with 200 and the body `OK`.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use log::info;

use chainhttp_rs::{ChainDispatcher, ChainFlow, HandlerRegistry, HttpServer, ServerConfig};

#[derive(Debug, Parser)]
#[command(name = "chainhttpd", version, about = "HTTP server that chains handlers from URL path segments")]
struct Args {
    /// TCP address host:port to listen on
    #[arg(long, default_value = "127.0.0.1:8128")]
    listen: SocketAddr,

    /// Maximum number of concurrent connections
    #[arg(long, default_value_t = 1024)]
    max_connections: usize,

    /// Start with an empty registry instead of the built-in status and delay
    /// handlers
    #[arg(long)]
    no_default_handlers: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let registry = if args.no_default_handlers {
        Arc::new(HandlerRegistry::new())
    } else {
        Arc::new(HandlerRegistry::with_defaults())
    };

    // The registration interface at work: /echo/<text> reflects its pair as
    // JSON, composing with the built-ins (/status/418/echo/teapot).
    registry
        .register("echo", |hop, response| async move {
            let body = serde_json::json!({ "key": hop.key, "value": hop.value });
            Ok(ChainFlow::Continue(response.with_json(&body)?))
        })
        .await;

    let config = ServerConfig {
        addr: args.listen,
        max_connections: args.max_connections,
        ..ServerConfig::default()
    };

    info!("starting chainhttpd");
    let server = HttpServer::new(config, ChainDispatcher::new(registry));
    server.start().await?;

    Ok(())
}
