use tracing::{info, warn};

use crate::models::NewsResponse;
use crate::service::newsapi::{FetchError, NewsApiClient};

const TOP_HEADLINES_PATH: &str = "/v2/top-headlines";

impl NewsApiClient {
    /// Fetch the top headlines for an ISO country code.
    pub async fn fetch_top_headlines(&self, country: &str) -> Result<NewsResponse, FetchError> {
        let country = country.trim();
        if country.is_empty() {
            return Err(FetchError::InvalidCountry);
        }

        let (status, body) = self
            .get(
                TOP_HEADLINES_PATH,
                &[("country", country), ("apiKey", self.api_key())],
            )
            .await?;

        if !status.is_success() {
            warn!("News api returned error status {}", status);
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response = parse_headlines(status.as_u16(), &body)?;
        info!(
            "Fetched {} headlines for {} (total {})",
            response.articles.len(),
            country,
            response.total_results
        );
        Ok(response)
    }
}

/// Decode a successful body; blank or `null` bodies count as empty.
pub(crate) fn parse_headlines(status: u16, body: &str) -> Result<NewsResponse, FetchError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(FetchError::EmptyBody { status });
    }

    let deserializer = &mut serde_json::Deserializer::from_str(trimmed);
    serde_path_to_error::deserialize(deserializer).map_err(|e| {
        let preview = &trimmed[..floor_char_boundary(trimmed, 500)];
        warn!(
            "Failed to parse news api response: {}; body preview: {}",
            e, preview
        );
        FetchError::Decode {
            path: e.path().to_string(),
            message: e.into_inner().to_string(),
        }
    })
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    (0..=max).rev().find(|i| s.is_char_boundary(*i)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_null_bodies_are_empty() {
        for body in ["", "   ", "null", " null\n"] {
            assert!(matches!(
                parse_headlines(200, body),
                Err(FetchError::EmptyBody { status: 200 })
            ));
        }
    }

    #[test]
    fn decode_error_reports_path() {
        let err = parse_headlines(200, r#"{"status":"ok","totalResults":"many","articles":[]}"#)
            .unwrap_err();
        match err {
            FetchError::Decode { path, .. } => assert_eq!(path, "totalResults"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn preview_cut_respects_utf8() {
        let s = "é".repeat(300);
        let cut = floor_char_boundary(&s, 501);
        assert!(s.is_char_boundary(cut));
        assert!(cut <= 501);
    }
}
