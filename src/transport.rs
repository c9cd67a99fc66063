//! HTTP transport seam.
//!
//! The pipeline speaks to the network through [`Transport`] so tests can swap
//! in canned responses. [`ReqwestTransport`] is the production implementation.

use std::fmt;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::redirect::Policy;
use serde_json::Value;

use crate::config::{self, ClientConfig};
use crate::error::{Result, ScryfallError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved outbound request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL, possibly already carrying a query string.
    pub url: String,
    /// Extra query parameters; `None` values never reach the wire.
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub follow_redirects: bool,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>, query: Vec<(String, String)>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            query,
            body: None,
            follow_redirects: false,
        }
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            query: Vec::new(),
            body: Some(body),
            follow_redirects: false,
        }
    }

    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    /// The URL with the query parameters appended, used as the cache key.
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let encoded: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        let sep = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.url, sep, encoded.join("&"))
    }
}

/// Raw response as seen by the pipeline.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Final URL after any redirects.
    pub url: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Something that can execute an [`HttpRequest`].
///
/// Implementations return every status code as a response; classifying
/// error statuses is the pipeline's job.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Blocking `reqwest` transport.
///
/// Holds two clients since the redirect policy is fixed per client: JSON
/// endpoints never follow redirects, image endpoints follow up to ten.
pub struct ReqwestTransport {
    direct: Client,
    redirecting: Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            direct: build_client(config, Policy::none())?,
            redirecting: build_client(config, Policy::limited(10))?,
        })
    }
}

fn build_client(config: &ClientConfig, policy: Policy) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(config::ACCEPT));
    let agent = HeaderValue::from_str(&config.user_agent)
        .map_err(|e| ScryfallError::Validation(format!("Invalid user agent: {}", e)))?;
    headers.insert(USER_AGENT, agent);

    Ok(Client::builder()
        .timeout(config.timeout)
        .default_headers(headers)
        .redirect(policy)
        .build()?)
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let client = if request.follow_redirects {
            &self.redirecting
        } else {
            &self.direct
        };

        let mut builder = match request.method {
            Method::Get => client.get(&request.url),
            Method::Post => client.post(&request.url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send()?;
        let status = resp.status().as_u16();
        let url = resp.url().to_string();
        let body = resp.bytes()?.to_vec();
        Ok(HttpResponse { status, url, body })
    }
}
