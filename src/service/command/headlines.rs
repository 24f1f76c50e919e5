use chrono::Utc;

use crate::models::{Article, NewsResponse, ResourceState};

pub const LOADING_TEXT: &str = "Loading headlines…";
pub const EMPTY_STATE_TEXT: &str = "No News Available now, Please check back later!";

/// Render the published state as text lines for a terminal.
///
/// Errors and empty results share the empty-state text.
pub fn render(state: &ResourceState<NewsResponse>, limit: Option<usize>) -> Vec<String> {
    match state {
        ResourceState::Loading => vec![LOADING_TEXT.to_string()],
        ResourceState::Error(_) => vec![EMPTY_STATE_TEXT.to_string()],
        ResourceState::Success(response) if response.articles.is_empty() => {
            vec![EMPTY_STATE_TEXT.to_string()]
        }
        ResourceState::Success(response) => {
            let take = limit.unwrap_or(response.articles.len());
            let mut lines = Vec::new();
            lines.push(format!(
                "Top headlines ({} of {})",
                take.min(response.articles.len()),
                response.total_results
            ));
            for article in response.articles.iter().take(take) {
                lines.push(render_article(article));
            }
            lines
        }
    }
}

fn render_article(article: &Article) -> String {
    let title = article.title.as_deref().unwrap_or("").trim();
    let byline = match (article.author.as_deref(), article.source_name()) {
        (Some(author), Some(source)) => format!("{author}, {source}"),
        (Some(author), None) => author.to_string(),
        (None, Some(source)) => source.to_string(),
        (None, None) => "Unknown".to_string(),
    };
    let time_str = article
        .published_at()
        .map(|t| t.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "time n/a".to_string());

    match article.url.as_deref() {
        Some(url) => format!("• {} — {} ({})\n  {}", title, byline, time_str, url),
        None => format!("• {} — {} ({})", title, byline, time_str),
    }
}
