pub mod news;
pub mod resource;

pub use news::{Article, NewsResponse, Source};
pub use resource::ResourceState;
