//! HTTP parser module.
//!
//! Parses the request line and headers of an inbound HTTP request. The chain
//! core only ever consumes the path; the body and query string are left to
//! whatever handler cares to look at them.

mod request;
mod method;
mod version;
mod error;

// Re-export public items
pub use request::HttpRequest;
pub use method::Method;
pub use version::HttpVersion;
pub use error::Error;

// Re-export the parse_request function
pub use request::parse_request;
