//! Request pipeline: rate limit, send, raise on error status, sanitize,
//! paginate, resolve.
//!
//! Every query method funnels through [`Connection`]. Follow-up page requests
//! go through the same limiter and error check as the first request.

use crate::cache::ResponseCache;
use crate::config::ClientConfig;
use crate::error::{Result, ScryfallError};
use crate::models::{resolve, resolve_as, ApiList, Record, Resolve};
use crate::pagination::resolve_pages;
use crate::params::QueryParams;
use crate::rate_limit::RateLimiter;
use crate::sanitize::sanitize;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};
use serde_json::Value;
use tracing::{error, info, warn};

/// Owns the transport, limiter and optional cache for one client.
///
/// Holds no mutable state, so one connection can serve concurrent callers.
pub struct Connection {
    config: ClientConfig,
    limiter: RateLimiter,
    transport: Box<dyn Transport>,
    cache: Option<ResponseCache>,
}

impl Connection {
    /// Create a connection over `transport`.
    pub fn new(
        config: ClientConfig,
        transport: Box<dyn Transport>,
        cache: Option<ResponseCache>,
    ) -> Self {
        let limiter = RateLimiter::new(config.rate_limit);
        Self {
            config,
            limiter,
            transport,
            cache,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    // -- JSON -----------------------------------------------------------------

    /// GET `path` and return the sanitized (and optionally paginated) payload
    /// without resolving it into records.
    ///
    /// `result_key` names the collection field accumulated across pages, or
    /// `None` to accumulate whole pages.
    pub fn get_json(
        &self,
        path: &str,
        params: &QueryParams,
        result_key: Option<&str>,
        paginate: bool,
    ) -> Result<Value> {
        let request = HttpRequest::get(self.config.url_for(path), params.build());
        let first = self.send_json(request)?;
        if paginate {
            self.paginate(first, result_key)
        } else {
            Ok(first)
        }
    }

    /// GET `path`, follow its pages, and resolve the result into a record.
    ///
    /// Single objects are resolved strictly. List envelopes resolve each
    /// element and drop the ones that fail to decode.
    pub fn fetch_json(
        &self,
        path: &str,
        params: &QueryParams,
        result_key: Option<&str>,
    ) -> Result<Record> {
        into_record(self.get_json(path, params, result_key, true)?)
    }

    /// Like [`fetch_json`](Self::fetch_json) but never follows `next_page`.
    pub fn fetch_json_unpaginated(&self, path: &str, params: &QueryParams) -> Result<Record> {
        into_record(self.get_json(path, params, None, false)?)
    }

    /// GET `path` and resolve the result as a `T`.
    pub fn fetch_as<T: Resolve>(
        &self,
        path: &str,
        params: &QueryParams,
        result_key: Option<&str>,
    ) -> Result<T> {
        resolve_as(self.get_json(path, params, result_key, true)?)
    }

    /// GET a paginated list endpoint, accumulating every page's `data`.
    pub fn fetch_list(&self, path: &str, params: &QueryParams) -> Result<ApiList> {
        self.fetch_as(path, params, Some("data"))
    }

    /// POST `body` as JSON to `path` and post-process like
    /// [`fetch_json`](Self::fetch_json). Follow-up pages are fetched with GET.
    pub fn post_json(&self, path: &str, body: &Value, result_key: Option<&str>) -> Result<Record> {
        into_record(self.post_value(path, body, result_key)?)
    }

    /// POST and resolve the result as a `T`.
    pub fn post_as<T: Resolve>(
        &self,
        path: &str,
        body: &Value,
        result_key: Option<&str>,
    ) -> Result<T> {
        resolve_as(self.post_value(path, body, result_key)?)
    }

    fn post_value(&self, path: &str, body: &Value, result_key: Option<&str>) -> Result<Value> {
        let request = HttpRequest::post(self.config.url_for(path), body.clone());
        let first = self.send_json(request)?;
        self.paginate(first, result_key)
    }

    fn paginate(&self, first: Value, result_key: Option<&str>) -> Result<Value> {
        resolve_pages(first, result_key, &self.config.base_url, |path| {
            self.send_json(HttpRequest::get(self.config.url_for(path), Vec::new()))
        })
    }

    fn send_json(&self, request: HttpRequest) -> Result<Value> {
        let resp = self.send(request)?;
        let raw: Value = serde_json::from_slice(&resp.body)?;
        Ok(sanitize(raw))
    }

    // -- Images ---------------------------------------------------------------

    /// GET an image endpoint, following the redirect to the CDN, and return
    /// the raw bytes.
    pub fn fetch_image(&self, path: &str, params: &QueryParams) -> Result<Vec<u8>> {
        let request =
            HttpRequest::get(self.config.url_for(path), params.build()).follow_redirects(true);
        Ok(self.send(request)?.body)
    }

    // -- Transport --------------------------------------------------------------

    /// Send one request through the cache, limiter and transport.
    ///
    /// Any status >= 400 becomes [`ScryfallError::HttpStatus`] after the body
    /// has been logged.
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.full_url();
        let method = request.method;
        let cacheable = method == Method::Get && self.config.is_cacheable(&url);

        if let Some(cache) = &self.cache {
            if cache.offline {
                if method != Method::Get {
                    return Err(ScryfallError::NotFound(format!(
                        "{} {} cannot be served in offline mode",
                        method, url
                    )));
                }
                return Ok(cached_response(&url, cache.require(&url)?));
            }
            if cacheable {
                if let Some(body) = cache.get(&url) {
                    return Ok(cached_response(&url, body));
                }
            }
        }

        info!(method = method.as_str(), url = %url, "Sending request");
        self.limiter.wait(method.as_str(), &url);
        let resp = self.transport.send(&request)?;
        info!(
            method = method.as_str(),
            status = resp.status,
            url = %resp.url,
            "Received response"
        );

        if resp.is_error() {
            let body = resp.text();
            error!(status = resp.status, url = %resp.url, body = %body, "API error response");
            return Err(ScryfallError::HttpStatus {
                status: resp.status,
                url: resp.url,
                body,
            });
        }

        if cacheable {
            if let Some(cache) = &self.cache {
                if let Err(e) = cache.put(&url, &resp.body) {
                    warn!(url = %url, error = %e, "Failed to cache response");
                }
            }
        }

        Ok(resp)
    }
}

fn cached_response(url: &str, body: Vec<u8>) -> HttpResponse {
    HttpResponse {
        status: 200,
        url: url.to_string(),
        body,
    }
}

/// Resolve a pipeline result; an array of whole pages becomes a list of page
/// records.
fn into_record(value: Value) -> Result<Record> {
    match value {
        Value::Array(pages) => Ok(Record::List(ApiList::from_pages(pages))),
        other => resolve(other),
    }
}
