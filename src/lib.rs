//! Scryfall SDK for Rust.
//!
//! Provides a high-level client for the Scryfall Magic: The Gathering API.
//! Every request is self rate limited, every response has its `id` / `object`
//! keys normalized to `api_id` / `obj`, list endpoints are followed across all
//! of their pages, and payloads are resolved into typed records by their
//! `obj` tag.
//!
//! # Quick start
//!
//! ```no_run
//! use scryfall_sdk::ScryfallSdk;
//! use scryfall_sdk::queries::NamedCardParams;
//!
//! let sdk = ScryfallSdk::builder().build().unwrap();
//!
//! // Look up a card
//! let bolt = sdk.cards().named(&NamedCardParams::exact("Lightning Bolt")).unwrap();
//!
//! // Every set, all pages merged
//! let sets = sdk.sets().all().unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod connection;
pub mod error;
pub mod models;
pub mod pagination;
pub mod params;
pub mod queries;
pub mod rate_limit;
pub mod sanitize;
pub mod transport;

#[cfg(feature = "async")]
pub use async_client::AsyncScryfallSdk;
pub use cache::ResponseCache;
pub use config::ClientConfig;
pub use connection::Connection;
pub use error::{Result, ScryfallError};
pub use models::{ApiList, Record, RecordTag};
pub use params::QueryParams;
pub use sanitize::sanitize;
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// ScryfallSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`ScryfallSdk`] instance.
///
/// Use [`ScryfallSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](ScryfallSdkBuilder::build) to create the SDK.
pub struct ScryfallSdkBuilder {
    config: ClientConfig,
    cache_enabled: bool,
    cache_dir: Option<PathBuf>,
    cache_max_age: Option<Duration>,
    offline: bool,
    transport: Option<Box<dyn Transport>>,
}

impl Default for ScryfallSdkBuilder {
    fn default() -> Self {
        Self {
            config: ClientConfig::default(),
            cache_enabled: false,
            cache_dir: None,
            cache_max_age: Some(config::DEFAULT_CACHE_MAX_AGE),
            offline: false,
            transport: None,
        }
    }
}

impl ScryfallSdkBuilder {
    /// Point the SDK at a different API root.
    ///
    /// A trailing `/` is added if missing. Defaults to
    /// `https://api.scryfall.com/`.
    pub fn base_url(mut self, url: &str) -> Self {
        let mut url = url.to_string();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.config.base_url = url;
        self
    }

    /// Set the delay applied before every request.
    ///
    /// Defaults to 500 ms. `Duration::ZERO` disables throttling.
    pub fn rate_limit(mut self, delay: Duration) -> Self {
        self.config.rate_limit = delay;
        self
    }

    /// Replace the list of platforms accepted by
    /// [`CardQuery::by_platform_id`](queries::CardQuery::by_platform_id).
    pub fn platforms<I, S>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.platforms = platforms.into_iter().map(Into::into).collect();
        self
    }

    /// Set the HTTP request timeout.
    ///
    /// Defaults to 60 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header sent with every request.
    pub fn user_agent(mut self, agent: &str) -> Self {
        self.config.user_agent = agent.to_string();
        self
    }

    /// Enable the response cache in the platform default directory
    /// (e.g. `~/.cache/scryfall-sdk` on Linux).
    pub fn cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Enable the response cache in a custom directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self.cache_enabled = true;
        self
    }

    /// Set how long cached responses stay fresh.
    ///
    /// Defaults to 24 hours. `None` keeps entries until the cache is cleared.
    /// Offline mode serves entries regardless of age.
    pub fn cache_max_age(mut self, max_age: Option<Duration>) -> Self {
        self.cache_max_age = max_age;
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never touches the network and only serves
    /// previously cached responses. Implies caching.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        if offline {
            self.cache_enabled = true;
        }
        self
    }

    /// Send requests through a custom [`Transport`] instead of `reqwest`.
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Build the SDK.
    ///
    /// Creates the cache directory when caching is enabled. No request is
    /// made until the first query.
    pub fn build(self) -> Result<ScryfallSdk> {
        let transport = match self.transport {
            Some(t) => t,
            None => Box::new(ReqwestTransport::new(&self.config)?),
        };
        let cache = if self.cache_enabled {
            Some(
                ResponseCache::new(self.cache_dir, self.offline)?
                    .with_max_age(self.cache_max_age),
            )
        } else {
            None
        };
        let conn = Connection::new(self.config, transport, cache);
        Ok(ScryfallSdk { conn })
    }
}

// ---------------------------------------------------------------------------
// ScryfallSdk
// ---------------------------------------------------------------------------

/// The main entry point for the Scryfall SDK.
///
/// Wraps a [`Connection`] and exposes endpoint-specific query interfaces as
/// lightweight borrowing wrappers.
///
/// Created via [`ScryfallSdk::builder()`].
pub struct ScryfallSdk {
    conn: Connection,
}

impl ScryfallSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> ScryfallSdkBuilder {
        ScryfallSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the card query interface.
    pub fn cards(&self) -> queries::CardQuery<'_> {
        queries::CardQuery::new(&self.conn)
    }

    /// Access the set query interface.
    pub fn sets(&self) -> queries::SetQuery<'_> {
        queries::SetQuery::new(&self.conn)
    }

    /// Access the rulings query interface.
    pub fn rulings(&self) -> queries::RulingQuery<'_> {
        queries::RulingQuery::new(&self.conn)
    }

    /// Access the symbology query interface.
    pub fn symbology(&self) -> queries::SymbologyQuery<'_> {
        queries::SymbologyQuery::new(&self.conn)
    }

    /// Access the catalog query interface.
    pub fn catalogs(&self) -> queries::CatalogQuery<'_> {
        queries::CatalogQuery::new(&self.conn)
    }

    /// Access the bulk data query interface.
    pub fn bulk_data(&self) -> queries::BulkDataQuery<'_> {
        queries::BulkDataQuery::new(&self.conn)
    }

    // -- Escape hatches ----------------------------------------------------

    /// GET any endpoint and resolve the result by its `obj` tag.
    ///
    /// `result_key` names the paginated collection field (`Some("data")` for
    /// list endpoints) or `None` for single objects.
    pub fn fetch(
        &self,
        path: &str,
        params: &QueryParams,
        result_key: Option<&str>,
    ) -> Result<Record> {
        self.conn.fetch_json(path, params, result_key)
    }

    /// Empty the response cache, if one is configured.
    pub fn clear_cache(&self) -> Result<()> {
        match self.conn.cache() {
            Some(cache) => cache.clear(),
            None => Ok(()),
        }
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for ScryfallSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.conn.config();
        let cache = self
            .conn
            .cache()
            .map(|c| c.cache_dir.display().to_string())
            .unwrap_or_else(|| "none".to_string());
        write!(
            f,
            "ScryfallSdk(base_url={}, rate_limit={}ms, cache={}, offline={})",
            config.base_url,
            config.rate_limit.as_millis(),
            cache,
            self.conn.cache().is_some_and(|c| c.offline)
        )
    }
}
