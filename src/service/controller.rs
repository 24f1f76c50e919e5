use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::models::{NewsResponse, ResourceState};
use crate::service::repository::NewsRepository;

pub type HeadlinesState = ResourceState<NewsResponse>;

/// Owns the published headline state and the task that fills it.
///
/// One fetch is started when the controller is built. Observers read the
/// latest state through [`NewsController::subscribe`]. Dropping the
/// controller aborts a fetch that is still running.
pub struct NewsController {
    state: watch::Sender<HeadlinesState>,
    task: JoinHandle<()>,
}

impl NewsController {
    /// Build the controller and start fetching headlines for `country`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(repository: Arc<NewsRepository>, country: &str) -> Self {
        let (state, _) = watch::channel(ResourceState::Loading);
        let stream = repository.observe_headlines(country);
        let publisher = state.clone();
        let country = country.to_string();

        info!("Starting headline fetch for {}", country);
        // Single collection per controller; nothing else writes the state.
        let task = tokio::spawn(async move {
            let mut stream = Box::pin(stream);
            while let Some(next) = stream.next().await {
                debug!("Publishing headline state for {}: {}", country, label(&next));
                publisher.send_replace(next);
            }
        });

        Self { state, task }
    }

    /// Latest published state.
    pub fn current(&self) -> HeadlinesState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<HeadlinesState> {
        self.state.subscribe()
    }

    /// Wait until the fetch publishes `Success` or `Error`.
    ///
    /// Returns `None` if the controller is dropped first.
    pub async fn wait_for_terminal(&self) -> Option<HeadlinesState> {
        let mut rx = self.subscribe();
        let state = rx.wait_for(|s| s.is_terminal()).await.ok()?;
        Some(state.clone())
    }
}

impl Drop for NewsController {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn label(state: &HeadlinesState) -> &'static str {
    match state {
        ResourceState::Loading => "loading",
        ResourceState::Success(_) => "success",
        ResourceState::Error(_) => "error",
    }
}
