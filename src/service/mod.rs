pub mod command;
pub mod controller;
pub mod newsapi;
pub mod repository;

pub use controller::{HeadlinesState, NewsController};
pub use newsapi::{FetchError, NewsApiClient};
pub use repository::{NewsDataSource, NewsRepository, FETCH_FAILED_MESSAGE};
