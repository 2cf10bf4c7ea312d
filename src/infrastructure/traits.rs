//! I/O boundary traits for testability
//!
//! These traits abstract network access, allowing services
//! to be tested with mock implementations.

use std::io;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;

/// Maximum redirects followed when a request opts into following them.
const MAX_REDIRECTS: usize = 10;

/// A GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Follow 3xx responses; when false the redirect response itself is returned.
    pub follow_redirects: bool,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            follow_redirects: true,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn no_redirects(mut self) -> Self {
        self.follow_redirects = false;
        self
    }

    /// Value of the first header with this name (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A fully read response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// `Location` header, if any
    pub location: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            location: None,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

/// HTTP client abstraction.
///
/// Any status code is a successful round trip; `Err` means the request
/// could not be completed (DNS, TLS, timeout, connection reset).
pub trait HttpClient: Send + Sync {
    fn get(&self, request: &HttpRequest) -> io::Result<HttpResponse>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Blocking reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    following: Client,
    manual: Client,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration, user_agent: &str, insecure: bool) -> io::Result<Self> {
        let build = |policy: Policy| {
            Client::builder()
                .timeout(timeout)
                .user_agent(user_agent)
                .danger_accept_invalid_certs(insecure)
                .redirect(policy)
                .build()
                .map_err(transport_error)
        };

        Ok(Self {
            following: build(Policy::limited(MAX_REDIRECTS))?,
            manual: build(Policy::none())?,
        })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn get(&self, request: &HttpRequest) -> io::Result<HttpResponse> {
        let client = if request.follow_redirects {
            &self.following
        } else {
            &self.manual
        };

        let mut builder = client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().map_err(transport_error)?;
        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().map_err(transport_error)?;

        Ok(HttpResponse {
            status,
            location,
            body,
        })
    }
}

fn transport_error(e: reqwest::Error) -> io::Error {
    if e.is_timeout() {
        io::Error::new(io::ErrorKind::TimedOut, e)
    } else {
        io::Error::other(e)
    }
}
