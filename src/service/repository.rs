use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::{self, Stream, StreamExt};
use futures_util::FutureExt;
use tracing::{info, warn};

use crate::models::{NewsResponse, ResourceState};
use crate::service::newsapi::{FetchError, NewsApiClient};

pub const FETCH_FAILED_MESSAGE: &str = "Error Fetching News data";
const UNKNOWN_FAULT_MESSAGE: &str = "Some error in flow";

/// Where headlines come from. `NewsApiClient` is the production source.
#[async_trait]
pub trait NewsDataSource: Send + Sync {
    async fn top_headlines(&self, country: &str) -> Result<NewsResponse, FetchError>;
}

#[async_trait]
impl NewsDataSource for NewsApiClient {
    async fn top_headlines(&self, country: &str) -> Result<NewsResponse, FetchError> {
        self.fetch_top_headlines(country).await
    }
}

/// Turns one headline fetch into a sequence of `ResourceState`s.
#[derive(Clone)]
pub struct NewsRepository {
    source: Arc<dyn NewsDataSource>,
}

impl NewsRepository {
    pub fn new(source: Arc<dyn NewsDataSource>) -> Self {
        Self { source }
    }

    /// A cold stream: `Loading`, then one terminal state, then the end.
    ///
    /// Nothing happens until the stream is polled, and every call performs
    /// its own fetch. Errors and panics from the source never escape; they
    /// become `ResourceState::Error`.
    pub fn observe_headlines(
        &self,
        country: &str,
    ) -> impl Stream<Item = ResourceState<NewsResponse>> + Send + 'static {
        let source = self.source.clone();
        let country = country.to_string();

        let terminal = stream::once(async move {
            let outcome = AssertUnwindSafe(async { source.top_headlines(&country).await })
                .catch_unwind()
                .await;

            match outcome {
                Ok(result) => to_state(&country, result),
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    warn!("Headline fetch for {} panicked: {}", country, message);
                    ResourceState::Error(message)
                }
            }
        });

        stream::once(async { ResourceState::Loading }).chain(terminal)
    }
}

fn to_state(
    country: &str,
    result: Result<NewsResponse, FetchError>,
) -> ResourceState<NewsResponse> {
    match result {
        Ok(response) => {
            info!(
                "Headlines for {}: status={} total={}",
                country, response.status, response.total_results
            );
            ResourceState::Success(response)
        }
        Err(err) if err.is_fault() => {
            warn!("Headline fetch for {} failed: {}", country, err);
            ResourceState::Error(err.to_string())
        }
        Err(err) => {
            warn!("Headline fetch for {} unsuccessful: {}", country, err);
            ResourceState::Error(FETCH_FAILED_MESSAGE.to_string())
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| UNKNOWN_FAULT_MESSAGE.to_string())
}
