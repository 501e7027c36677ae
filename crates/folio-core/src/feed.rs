//! Remote article feed consumer.
//!
//! One best-effort GET against an rss2json-style endpoint. The result is
//! always a [`FeedOutcome`]; transport, status and parse failures are logged
//! and folded into `Failed`. There is no retry and no cache.

use crate::config::AppConfig;
use chrono::{DateTime, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use ts_rs::TS;

pub const DEFAULT_MAX_ARTICLES: usize = 6;
pub const DEFAULT_EXCERPT_CHARS: usize = 150;
const ELLIPSIS: &str = "...";

static RE_LINK_REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]\[\d+\]").unwrap());
static RE_FOOTNOTE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*\[\d+\]:.*$").unwrap());
static RE_HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed responded with HTTP {0}")]
    Status(u16),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("feed reported status={status}: {message}")]
    Remote { status: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedOptions {
    pub max_articles: usize,
    pub excerpt_chars: usize,
    pub timeout: Duration,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            max_articles: DEFAULT_MAX_ARTICLES,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
            timeout: Duration::from_secs(10),
        }
    }
}

impl From<&AppConfig> for FeedOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_articles: config.max_articles,
            excerpt_chars: config.excerpt_chars,
            timeout: Duration::from_secs(config.feed_timeout_secs),
        }
    }
}

/// One blog-post summary.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub published_at: String,
    pub excerpt: String,
    pub thumbnail_url: Option<String>,
    pub categories: Vec<String>,
}

impl Article {
    /// `"Jan 15, 2024"`, or the raw timestamp if it cannot be parsed.
    pub fn display_date(&self) -> String {
        parse_published(&self.published_at)
            .map(|dt| dt.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| self.published_at.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedOutcome {
    Loaded(Vec<Article>),
    Empty,
    Failed(String),
}

impl FeedOutcome {
    pub fn articles(&self) -> &[Article] {
        match self {
            FeedOutcome::Loaded(articles) => articles,
            FeedOutcome::Empty | FeedOutcome::Failed(_) => &[],
        }
    }
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    items: Vec<FeedItem>,
}

#[derive(Debug, Deserialize)]
struct FeedItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default, rename = "pubDate")]
    pub_date: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    enclosure: Option<Enclosure>,
    #[serde(default)]
    categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Enclosure {
    #[serde(default)]
    link: Option<String>,
    #[serde(default, rename = "type")]
    mime: Option<String>,
}

/// Fetch and parse the feed. Never fails past this call.
pub async fn fetch_articles(feed_url: &str, options: &FeedOptions) -> FeedOutcome {
    info!(url = feed_url, "Fetching article feed");
    match request_feed(feed_url, options.timeout).await {
        Ok(body) => outcome_from_body(&body, options),
        Err(err) => {
            warn!(url = feed_url, "Article feed fetch failed: {err}");
            FeedOutcome::Failed(err.to_string())
        }
    }
}

async fn request_feed(feed_url: &str, timeout: Duration) -> Result<String, FeedError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let response = client
        .get(feed_url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Status(status.as_u16()));
    }
    Ok(response.text().await?)
}

/// Classify a response body into an outcome.
pub fn outcome_from_body(body: &str, options: &FeedOptions) -> FeedOutcome {
    match parse_feed(body, options) {
        Ok(articles) if articles.is_empty() => {
            info!("Article feed is empty");
            FeedOutcome::Empty
        }
        Ok(articles) => {
            debug!(count = articles.len(), "Parsed article feed");
            FeedOutcome::Loaded(articles)
        }
        Err(err) => {
            warn!("Article feed could not be used: {err}");
            FeedOutcome::Failed(err.to_string())
        }
    }
}

pub fn parse_feed(body: &str, options: &FeedOptions) -> Result<Vec<Article>, FeedError> {
    let response: FeedResponse = serde_json::from_str(body)?;
    if response.status != "ok" {
        return Err(FeedError::Remote {
            status: response.status,
            message: response.message.unwrap_or_default(),
        });
    }
    Ok(response
        .items
        .into_iter()
        .take(options.max_articles)
        .map(|item| article_from_item(item, options.excerpt_chars))
        .collect())
}

fn article_from_item(item: FeedItem, excerpt_chars: usize) -> Article {
    let source = if item.description.trim().is_empty() {
        &item.content
    } else {
        &item.description
    };
    let thumbnail_url = item
        .thumbnail
        .filter(|url| !url.trim().is_empty())
        .or_else(|| {
            let enclosure = item.enclosure?;
            let is_image = enclosure
                .mime
                .as_deref()
                .is_some_and(|mime| mime.starts_with("image"));
            enclosure.link.filter(|url| is_image && !url.trim().is_empty())
        });
    Article {
        title: item.title.trim().to_string(),
        link: item.link,
        published_at: item.pub_date,
        excerpt: excerpt(source, excerpt_chars),
        thumbnail_url,
        categories: item.categories,
    }
}

/// Plain-text excerpt of an HTML fragment: at most `max_chars` characters,
/// plus an ellipsis when something was cut.
pub fn excerpt(html: &str, max_chars: usize) -> String {
    let plain = match html2text::from_read(html.as_bytes(), 10_000) {
        Ok(text) => {
            let text = RE_FOOTNOTE_LINE.replace_all(&text, "");
            let text = RE_LINK_REFERENCE.replace_all(&text, "$1");
            text.replace("**", "")
        }
        Err(err) => {
            debug!("html2text failed on excerpt, stripping tags: {err}");
            RE_HTML_TAG.replace_all(html, " ").into_owned()
        }
    };
    let collapsed = RE_WHITESPACE.replace_all(plain.trim(), " ");

    if collapsed.chars().count() <= max_chars {
        return collapsed.into_owned();
    }
    let mut cut: String = collapsed.chars().take(max_chars).collect();
    cut.truncate(cut.trim_end().len());
    cut.push_str(ELLIPSIS);
    cut
}

fn parse_published(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
        .or_else(|| DateTime::parse_from_rfc2822(raw).ok().map(|dt| dt.naive_utc()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_json(idx: usize, description: &str) -> serde_json::Value {
        serde_json::json!({
            "title": format!("Post {idx}"),
            "pubDate": "2024-01-15 10:30:00",
            "link": format!("https://blog.example/post-{idx}"),
            "guid": format!("guid-{idx}"),
            "author": "someone",
            "thumbnail": if idx % 2 == 0 { format!("https://cdn.example/{idx}.png") } else { String::new() },
            "description": description,
            "content": "",
            "enclosure": {},
            "categories": ["rust", "systems"],
        })
    }

    fn feed_body(items: Vec<serde_json::Value>) -> String {
        serde_json::json!({
            "status": "ok",
            "feed": { "url": "https://medium.com/feed/@example", "title": "Example" },
            "items": items,
        })
        .to_string()
    }

    #[test]
    fn eight_items_truncate_to_six_with_bounded_excerpts() {
        let long = format!("<p>{}</p>", "word ".repeat(200));
        let body = feed_body((0..8).map(|idx| item_json(idx, &long)).collect());

        let outcome = outcome_from_body(&body, &FeedOptions::default());
        let FeedOutcome::Loaded(articles) = outcome else {
            panic!("expected loaded feed, got {outcome:?}");
        };
        assert_eq!(articles.len(), 6);
        for article in &articles {
            assert!(article.excerpt.chars().count() <= 153, "{}", article.excerpt);
            assert!(article.excerpt.ends_with("..."));
            assert_eq!(article.categories, vec!["rust", "systems"]);
        }
        assert_eq!(articles[0].title, "Post 0");
        assert_eq!(
            articles[0].thumbnail_url.as_deref(),
            Some("https://cdn.example/0.png")
        );
        assert_eq!(articles[1].thumbnail_url, None);
    }

    #[test]
    fn short_description_is_kept_without_ellipsis() {
        let excerpt = excerpt("<p>Hello <strong>world</strong>, from a feed.</p>", 150);
        assert!(excerpt.contains("Hello"));
        assert!(excerpt.contains("world"));
        assert!(!excerpt.ends_with("..."));
        assert!(!excerpt.contains('<'));
    }

    #[test]
    fn excerpt_drops_link_footnotes() {
        let excerpt = excerpt(
            r#"<p>Read <a href="https://example.invalid/x">the docs</a> first.</p>"#,
            150,
        );
        assert!(excerpt.contains("the docs"));
        assert!(!excerpt.contains("[1]"), "{excerpt}");
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        let excerpt = excerpt(&"é".repeat(400), 150);
        assert_eq!(excerpt.chars().count(), 153);
    }

    #[test]
    fn empty_item_list_is_empty_outcome() {
        let body = feed_body(Vec::new());
        assert_eq!(
            outcome_from_body(&body, &FeedOptions::default()),
            FeedOutcome::Empty
        );
    }

    #[test]
    fn error_status_and_garbage_fail() {
        let body = r#"{"status":"error","message":"rss_url is invalid","items":[]}"#;
        let FeedOutcome::Failed(reason) = outcome_from_body(body, &FeedOptions::default()) else {
            panic!("error status must fail");
        };
        assert!(reason.contains("rss_url is invalid"));

        assert!(matches!(
            outcome_from_body("<html>gateway timeout</html>", &FeedOptions::default()),
            FeedOutcome::Failed(_)
        ));
    }

    #[test]
    fn image_enclosure_backs_up_missing_thumbnail() {
        let mut item = item_json(1, "<p>x</p>");
        item["enclosure"] = serde_json::json!({
            "link": "https://cdn.example/cover.jpg",
            "type": "image/jpeg",
        });
        let articles = parse_feed(&feed_body(vec![item]), &FeedOptions::default())
            .expect("valid feed");
        assert_eq!(
            articles[0].thumbnail_url.as_deref(),
            Some("https://cdn.example/cover.jpg")
        );
    }

    #[test]
    fn display_date_formats_known_timestamps() {
        let mut article = Article {
            title: "t".to_string(),
            link: String::new(),
            published_at: "2024-01-15 10:30:00".to_string(),
            excerpt: String::new(),
            thumbnail_url: None,
            categories: Vec::new(),
        };
        assert_eq!(article.display_date(), "Jan 15, 2024");

        article.published_at = "Tue, 05 Mar 2024 08:00:00 GMT".to_string();
        assert_eq!(article.display_date(), "Mar 5, 2024");

        article.published_at = "sometime".to_string();
        assert_eq!(article.display_date(), "sometime");
    }

    #[test]
    fn unreachable_feed_yields_failed() {
        let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
        let options = FeedOptions {
            timeout: Duration::from_secs(2),
            ..FeedOptions::default()
        };
        let outcome = runtime.block_on(fetch_articles("http://127.0.0.1:9/feed.json", &options));
        assert!(matches!(outcome, FeedOutcome::Failed(_)), "{outcome:?}");

        let outcome = runtime.block_on(fetch_articles("not a url", &options));
        assert!(matches!(outcome, FeedOutcome::Failed(_)), "{outcome:?}");
    }

    #[test]
    fn error_status_yields_failed() {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
        let addr = listener.local_addr().expect("listener address");
        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept request");
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            stream
                .write_all(
                    b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                )
                .expect("write response");
        });

        let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
        let options = FeedOptions {
            timeout: Duration::from_secs(5),
            ..FeedOptions::default()
        };
        let url = format!("http://{addr}/feed.json");
        let outcome = runtime.block_on(fetch_articles(&url, &options));
        server.join().expect("server thread");

        match outcome {
            FeedOutcome::Failed(reason) => assert!(reason.contains("500"), "{reason}"),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
