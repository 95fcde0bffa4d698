//! Fetcher seam between the pipeline and the embedding application.
//!
//! The pipeline never sources items itself; it drives an injected
//! [`ItemFetcher`]. The orchestrator serializes overlapping logical requests
//! by cancellation, so an implementation never observes two concurrent
//! filtered fetches from the same pipeline instance.

use std::future::Future;

use anyhow::Result;
use async_trait::async_trait;

/// Asynchronous source of items for a search pipeline.
///
/// Called once with `None` at pipeline start to load the baseline set, and
/// with `Some(trimmed_non_empty_filter)` for every debounced filter value
/// thereafter. Errors are recovered inside the pipeline (empty display set
/// plus a diagnostic event); implementations should simply propagate them.
#[async_trait]
pub trait ItemFetcher<T>: Send + Sync {
    /// Fetches the items matching `filter`, or the unfiltered baseline when
    /// `filter` is `None`.
    async fn fetch_items(&self, filter: Option<&str>) -> Result<Vec<T>>;
}

/// Adapts a plain async closure into an [`ItemFetcher`].
///
/// The closure receives an owned `Option<String>` so the returned future
/// does not borrow from the call.
pub struct FetchFn<F> {
    fetch: F,
}

impl<F> FetchFn<F> {
    /// Wraps `fetch` as an [`ItemFetcher`].
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

#[async_trait]
impl<T, F, Fut> ItemFetcher<T> for FetchFn<F>
where
    T: Send + 'static,
    F: Fn(Option<String>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<T>>> + Send,
{
    async fn fetch_items(&self, filter: Option<&str>) -> Result<Vec<T>> {
        (self.fetch)(filter.map(str::to_owned)).await
    }
}
