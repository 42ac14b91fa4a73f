//! # Request Module
//!
//! The request descriptor handed to the matcher: a path plus a flat, CGI-style
//! server environment. Only a handful of keys are interpreted by the core
//! (`REQUEST_METHOD`, `HTTPS`, `SERVER_PORT`); everything else is passed
//! through untouched to custom match hooks.
//!
//! ```rust
//! use routemap::request::Request;
//!
//! let req = Request::new("/blog/42")
//!     .with_method("GET")
//!     .with_server("HTTPS", "on");
//!
//! assert_eq!(req.method(), Some("GET"));
//! assert!(req.is_https());
//! ```

use std::collections::HashMap;

/// Server key holding the request method
pub const REQUEST_METHOD: &str = "REQUEST_METHOD";
/// Server key set to `on` for TLS requests
pub const HTTPS: &str = "HTTPS";
/// Server key holding the local port the request arrived on
pub const SERVER_PORT: &str = "SERVER_PORT";
/// Server key holding the requested host
pub const HTTP_HOST: &str = "HTTP_HOST";

/// A request path and its server environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    path: String,
    server: HashMap<String, String>,
}

impl Request {
    /// Create a request with an empty server environment
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            server: HashMap::new(),
        }
    }

    /// Create a request from an existing server environment
    pub fn from_server(path: impl Into<String>, server: HashMap<String, String>) -> Self {
        Self {
            path: path.into(),
            server,
        }
    }

    /// Build the environment from an `http` request.
    ///
    /// Sets `REQUEST_METHOD` from the method, `HTTPS=on` for `https` URIs, and
    /// `HTTP_HOST`/`SERVER_PORT` from the URI authority or the `Host` header.
    /// The port falls back to the scheme default when neither carries one.
    pub fn from_http<B>(req: &http::Request<B>) -> Self {
        let uri = req.uri();
        let mut server = HashMap::with_capacity(4);
        server.insert(REQUEST_METHOD.to_string(), req.method().as_str().to_string());

        let https = uri.scheme_str() == Some("https");
        if https {
            server.insert(HTTPS.to_string(), "on".to_string());
        }

        let host_header = req
            .headers()
            .get(http::header::HOST)
            .and_then(|v| v.to_str().ok());
        let authority = uri.authority().map(|a| a.as_str()).or(host_header);

        if let Some(authority) = authority {
            let (host, port) = match authority.rsplit_once(':') {
                Some((host, port)) if port.bytes().all(|b| b.is_ascii_digit()) => {
                    (host, Some(port))
                }
                _ => (authority, None),
            };
            server.insert(HTTP_HOST.to_string(), host.to_string());
            if let Some(port) = port {
                server.insert(SERVER_PORT.to_string(), port.to_string());
            }
        }

        if !server.contains_key(SERVER_PORT) {
            match uri.scheme_str() {
                Some("https") => {
                    server.insert(SERVER_PORT.to_string(), "443".to_string());
                }
                Some("http") => {
                    server.insert(SERVER_PORT.to_string(), "80".to_string());
                }
                _ => {}
            }
        }

        Self {
            path: uri.path().to_string(),
            server,
        }
    }

    /// Set a server environment entry
    #[must_use]
    pub fn with_server(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.server.insert(key.into(), value.into());
        self
    }

    /// Set `REQUEST_METHOD`
    #[must_use]
    pub fn with_method(self, method: impl AsRef<str>) -> Self {
        self.with_server(REQUEST_METHOD, method.as_ref())
    }

    /// The request path
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The full server environment
    #[must_use]
    pub fn server(&self) -> &HashMap<String, String> {
        &self.server
    }

    /// A single server environment entry
    #[must_use]
    pub fn server_var(&self, key: &str) -> Option<&str> {
        self.server.get(key).map(String::as_str)
    }

    /// The request method, if the environment carries one
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.server_var(REQUEST_METHOD)
    }

    /// True when `HTTPS` is `on` or the request arrived on port 443
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.server_var(HTTPS) == Some("on") || self.server_var(SERVER_PORT) == Some("443")
    }
}
