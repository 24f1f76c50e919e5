use std::{env, sync::Arc};

use anyhow::Result;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use insight_news::service::command::headlines;
use insight_news::{NewsApiClient, NewsConfig, NewsController, NewsRepository};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .compact()
        .init();

    let mut config = NewsConfig::from_env()?;
    // A country passed on the command line wins over NEWS_COUNTRY.
    if let Some(country) = env::args().nth(1) {
        config = config.with_country(country);
    }

    let client = Arc::new(NewsApiClient::new(&config)?);
    info!("Initialized news client for {}", client.base_url());
    let repository = Arc::new(NewsRepository::new(client));
    let controller = NewsController::new(repository, &config.country);

    let mut updates = controller.subscribe();
    loop {
        let state = updates.borrow_and_update().clone();
        for line in headlines::render(&state, None) {
            println!("{line}");
        }
        if let Some(err) = state.error() {
            info!("Headline fetch ended with error: {err}");
        }
        if state.is_terminal() || updates.changed().await.is_err() {
            break;
        }
    }

    Ok(())
}
