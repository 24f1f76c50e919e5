pub mod config;
pub mod models;
pub mod service;

pub use config::{ConfigError, NewsConfig};
pub use models::{Article, NewsResponse, ResourceState, Source};
pub use service::{NewsApiClient, NewsController, NewsDataSource, NewsRepository};
