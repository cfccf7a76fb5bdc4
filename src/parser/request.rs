//! HTTP request parsing and representation.

use std::collections::HashMap;
use std::str::FromStr;

use crate::parser::error::Error;
use crate::parser::method::Method;
use crate::parser::version::HttpVersion;

/// Represents an HTTP request.
///
/// Only the pieces the server consumes are kept: the request line and the
/// headers. The path is stored verbatim, query string included; chain
/// segmentation strips the query later.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request path, including any query string
    pub path: String,
    /// The HTTP version
    pub version: HttpVersion,
    /// A map of header names (lowercase) to their values
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Create a new HTTP request.
    pub fn new(
        method: Method,
        path: String,
        version: HttpVersion,
        headers: HashMap<String, String>,
    ) -> Self {
        Self {
            method,
            path,
            version,
            headers,
        }
    }

    /// Get a header value by name (case-insensitive).
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_ascii_lowercase())
    }

    /// Check if the request has a specific header (case-insensitive).
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(&name.to_ascii_lowercase())
    }
}

/// Parse an HTTP request from a byte slice.
///
/// # Examples
///
/// ```
/// use chainhttp_rs::parse_request;
///
/// let request_bytes = b"GET /status/206/delay/2 HTTP/1.1\r\nHost: example.com\r\n\r\n";
/// let request = parse_request(request_bytes).unwrap();
///
/// assert_eq!(request.method.to_string(), "GET");
/// assert_eq!(request.path, "/status/206/delay/2");
/// assert_eq!(request.version.to_string(), "HTTP/1.1");
/// assert_eq!(request.headers.get("host"), Some(&"example.com".to_string()));
/// ```
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    if input.is_empty() {
        return Err(Error::EmptyRequest);
    }

    let input_str = String::from_utf8_lossy(input);
    let mut lines = input_str.lines();

    let request_line = lines.next().ok_or(Error::EmptyRequest)?;
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(Error::MalformedRequestLine(request_line.to_string()));
    }

    let method = Method::from_str(parts[0])?;

    // Only origin-form targets make sense here; the path is the chain.
    let path = parts[1].to_string();
    if !path.starts_with('/') {
        return Err(Error::InvalidPath);
    }

    let version = HttpVersion::from_str(parts[2])?;

    // Headers run until the first empty line; the body, if any, is ignored.
    let mut headers = HashMap::new();
    for line in lines {
        if line.is_empty() {
            break;
        }

        match line.split_once(':') {
            Some((name, value)) => {
                headers.insert(
                    name.trim().to_ascii_lowercase(), // headers are case-insensitive
                    value.trim().to_string(),
                );
            }
            None => return Err(Error::InvalidHeaderFormat),
        }
    }

    // Host is only required for HTTP/1.1
    if version == HttpVersion::Http11 && !headers.contains_key("host") {
        return Err(Error::MissingHeader("Host".to_string()));
    }

    Ok(HttpRequest {
        method,
        path,
        version,
        headers,
    })
}
