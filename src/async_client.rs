//! Async wrapper around [`ScryfallSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free. The
//! self rate-limit delay and the network wait both happen on that pool.
//!
//! # Example
//!
//! ```no_run
//! use scryfall_sdk::AsyncScryfallSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncScryfallSdk::builder().build().await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let set = sdk.run(|s| s.sets().by_code("mh3")).await.unwrap();
//!
//!     // Convenience method for card search
//!     let cards = sdk.search("c:white cmc:1").await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Result, ScryfallError};
use crate::models::{ApiList, Card, Record};
use crate::params::QueryParams;
use crate::queries::{NamedCardParams, SearchCardsParams};
use crate::ScryfallSdk;

// ---------------------------------------------------------------------------
// AsyncScryfallSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncScryfallSdk`] instance.
#[derive(Default)]
pub struct AsyncScryfallSdkBuilder {
    base_url: Option<String>,
    rate_limit: Option<Duration>,
    platforms: Option<Vec<String>>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    cache: bool,
    cache_dir: Option<PathBuf>,
    cache_max_age: Option<Option<Duration>>,
    offline: bool,
}

impl AsyncScryfallSdkBuilder {
    /// Point the SDK at a different API root.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    /// Set the delay applied before every request.
    pub fn rate_limit(mut self, delay: Duration) -> Self {
        self.rate_limit = Some(delay);
        self
    }

    /// Replace the list of platforms accepted by card lookups.
    pub fn platforms<I, S>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.platforms = Some(platforms.into_iter().map(Into::into).collect());
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the `User-Agent` header sent with every request.
    pub fn user_agent(mut self, agent: &str) -> Self {
        self.user_agent = Some(agent.to_string());
        self
    }

    /// Enable the response cache in the platform default directory.
    pub fn cache(mut self, enabled: bool) -> Self {
        self.cache = enabled;
        self
    }

    /// Enable the response cache in a custom directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set how long cached responses stay fresh; `None` never expires them.
    pub fn cache_max_age(mut self, max_age: Option<Duration>) -> Self {
        self.cache_max_age = Some(max_age);
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Build the async SDK.
    ///
    /// Client construction runs on the blocking thread pool since the
    /// blocking `reqwest` client must not be created inside the runtime.
    pub async fn build(self) -> Result<AsyncScryfallSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = ScryfallSdk::builder()
                .cache(self.cache)
                .offline(self.offline);
            if let Some(url) = self.base_url {
                builder = builder.base_url(&url);
            }
            if let Some(delay) = self.rate_limit {
                builder = builder.rate_limit(delay);
            }
            if let Some(platforms) = self.platforms {
                builder = builder.platforms(platforms);
            }
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            if let Some(agent) = self.user_agent {
                builder = builder.user_agent(&agent);
            }
            if let Some(dir) = self.cache_dir {
                builder = builder.cache_dir(dir);
            }
            if let Some(max_age) = self.cache_max_age {
                builder = builder.cache_max_age(max_age);
            }
            Ok(AsyncScryfallSdk::from_sdk(builder.build()?))
        })
        .await
        .map_err(|e| ScryfallError::Runtime(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncScryfallSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`ScryfallSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The SDK holds no mutable state, so it is
/// shared through an [`Arc`] and concurrent calls run in parallel.
///
/// # Cancellation
///
/// Dropping a returned future stops the caller from waiting but does not stop
/// the blocking task: a rate-limit delay already started runs to completion
/// and the request is still sent. Its result is discarded.
#[derive(Clone)]
pub struct AsyncScryfallSdk {
    // Only `None` once dropped.
    inner: Option<Arc<ScryfallSdk>>,
}

impl AsyncScryfallSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncScryfallSdkBuilder {
        AsyncScryfallSdkBuilder::default()
    }

    /// Wrap an already built sync SDK.
    pub fn from_sdk(sdk: ScryfallSdk) -> Self {
        Self {
            inner: Some(Arc::new(sdk)),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives an `&ScryfallSdk` reference and should return
    /// a `Result<T>`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use scryfall_sdk::AsyncScryfallSdk;
    /// # async fn example() -> scryfall_sdk::Result<()> {
    /// # let sdk = AsyncScryfallSdk::builder().build().await?;
    /// let symbols = sdk.run(|s| s.symbology().all()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&ScryfallSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self
            .inner
            .clone()
            .ok_or_else(|| ScryfallError::Runtime("SDK already closed".into()))?;
        tokio::task::spawn_blocking(move || f(&sdk))
            .await
            .map_err(|e| ScryfallError::Runtime(format!("Task join error: {e}")))?
    }

    /// GET any endpoint and resolve the result by its `obj` tag.
    pub async fn fetch(
        &self,
        path: &str,
        params: QueryParams,
        result_key: Option<&str>,
    ) -> Result<Record> {
        let path = path.to_string();
        let result_key = result_key.map(str::to_string);
        self.run(move |s| s.fetch(&path, &params, result_key.as_deref()))
            .await
    }

    /// Full-text card search, following every result page.
    pub async fn search(&self, query: &str) -> Result<ApiList> {
        let params = SearchCardsParams::new(query);
        self.run(move |s| s.cards().search(&params)).await
    }

    /// Look up a card by exact name.
    pub async fn named(&self, name: &str) -> Result<Card> {
        let params = NamedCardParams::exact(name);
        self.run(move |s| s.cards().named(&params)).await
    }
}

impl Drop for AsyncScryfallSdk {
    fn drop(&mut self) {
        // The blocking reqwest client panics when dropped on a runtime thread,
        // so the last handle releases the SDK on a plain thread instead.
        if let Some(sdk) = self.inner.take().and_then(Arc::into_inner) {
            std::thread::spawn(move || drop(sdk));
        }
    }
}
