#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use insight_news::service::FetchError;
use insight_news::{Article, NewsDataSource, NewsResponse, Source};

pub fn article(title: &str) -> Article {
    Article {
        source: Some(Source {
            id: None,
            name: Some("Wire".into()),
        }),
        title: Some(title.to_string()),
        url: Some(format!("https://example.com/{title}")),
        ..Article::default()
    }
}

pub fn ok_response(titles: &[&str]) -> NewsResponse {
    NewsResponse {
        status: "ok".into(),
        total_results: titles.len() as i64,
        articles: titles.iter().map(|t| article(t)).collect(),
    }
}

/// What a fake source does when asked for headlines.
#[derive(Clone)]
pub enum Behavior {
    Respond(NewsResponse),
    Fail(fn() -> FetchError),
    Panic(&'static str),
    Hang,
}

/// In-memory data source that counts calls.
pub struct FakeSource {
    behavior: Behavior,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn delayed(behavior: Behavior, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsDataSource for FakeSource {
    async fn top_headlines(&self, _country: &str) -> Result<NewsResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.behavior {
            Behavior::Respond(response) => Ok(response.clone()),
            Behavior::Fail(make) => Err(make()),
            Behavior::Panic(message) => panic!("{}", message),
            Behavior::Hang => std::future::pending::<Result<NewsResponse, FetchError>>().await,
        }
    }
}

/// Accepts one connection and never answers it.
pub async fn serve_silent() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    (format!("http://{addr}"), handle)
}

/// One-shot HTTP server on localhost. Resolves to the raw request head.
pub async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&buf).to_string()
    });

    (format!("http://{addr}"), handle)
}
