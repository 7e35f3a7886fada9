//! Medium integration API adapter.

use crate::credentials::{REDACTED, lookup_value};
use crate::http::{self, str_at};
use crate::PlatformAdapter;
use async_trait::async_trait;
use derive_getters::Getters;
use pressroom_core::{Article, ConnectionStatus, PlatformKind, PostContent, PublishOutcome};
use pressroom_error::{PlatformError, PlatformErrorKind, PlatformResult};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

/// Maximum number of tags Medium accepts on a post.
pub const MEDIUM_MAX_TAGS: usize = 5;

const DEFAULT_BASE_URL: &str = "https://api.medium.com/v1";
const MAX_DERIVED_TITLE_CHARS: usize = 100;

/// Every post is created as a draft, whatever the caller intended.
const PUBLISH_STATUS: &str = "draft";

/// Integration token credentials.
#[derive(Clone, Getters, Deserialize)]
pub struct MediumCredentials {
    /// Self-issued integration token
    integration_token: String,
    /// Author user id
    author_id: String,
    /// Publication to post into instead of the author's feed
    #[serde(default)]
    publication_id: Option<String>,
}

impl MediumCredentials {
    /// Create a credential set posting to the author's own feed.
    pub fn new(integration_token: impl Into<String>, author_id: impl Into<String>) -> Self {
        Self {
            integration_token: integration_token.into(),
            author_id: author_id.into(),
            publication_id: None,
        }
    }

    /// Post into `publication_id` instead of the author's feed.
    pub fn with_publication(mut self, publication_id: impl Into<String>) -> Self {
        self.publication_id = Some(publication_id.into());
        self
    }

    /// Read `MEDIUM_INTEGRATION_TOKEN`, `MEDIUM_AUTHOR_ID` and the optional
    /// `MEDIUM_PUBLICATION_ID`.
    pub fn from_lookup<F>(lookup: &F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Some(Self {
            integration_token: lookup_value(lookup, "MEDIUM_INTEGRATION_TOKEN")?,
            author_id: lookup_value(lookup, "MEDIUM_AUTHOR_ID")?,
            publication_id: lookup_value(lookup, "MEDIUM_PUBLICATION_ID"),
        })
    }

    /// Where posts are created.
    pub fn target(&self) -> MediumTarget {
        match self.publication_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => MediumTarget::Publication(id.to_string()),
            _ => MediumTarget::User(self.author_id.clone()),
        }
    }
}

impl std::fmt::Debug for MediumCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediumCredentials")
            .field("integration_token", &REDACTED)
            .field("author_id", &self.author_id)
            .field("publication_id", &self.publication_id)
            .finish()
    }
}

/// Destination of a Medium post. A publication takes precedence over the
/// author's personal feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediumTarget {
    /// Author's personal feed
    User(String),
    /// Configured publication
    Publication(String),
}

impl MediumTarget {
    /// Posts path relative to the API root.
    pub fn posts_path(&self) -> String {
        match self {
            Self::User(id) => format!("users/{}/posts", id),
            Self::Publication(id) => format!("publications/{}/posts", id),
        }
    }
}

/// Adapter for creating Medium posts.
///
/// Posts are always created as drafts.
#[derive(Debug, Clone)]
pub struct MediumAdapter {
    client: Client,
    credentials: Option<MediumCredentials>,
    base_url: String,
}

impl MediumAdapter {
    /// Create an adapter; `None` credentials make it permanently not ready.
    pub fn new(credentials: Option<MediumCredentials>) -> Self {
        Self::with_client(Client::new(), credentials)
    }

    /// Create an adapter sharing an existing HTTP client.
    pub fn with_client(client: Client, credentials: Option<MediumCredentials>) -> Self {
        debug!(ready = credentials.is_some(), "Created Medium adapter");
        Self {
            client,
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn credentials(&self) -> PlatformResult<&MediumCredentials> {
        self.credentials.as_ref().ok_or_else(|| {
            PlatformError::new(PlatformErrorKind::NotConfigured(
                PlatformKind::Medium.display_name().to_string(),
            ))
        })
    }

    /// Trim tags, drop empty ones and keep at most [`MEDIUM_MAX_TAGS`].
    pub fn normalize_tags(tags: &[String]) -> Vec<String> {
        tags.iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .take(MEDIUM_MAX_TAGS)
            .map(str::to_string)
            .collect()
    }

    /// Article built from a status update: the first non-empty line is the
    /// title, the whole text is the body.
    pub fn article_from_status(text: &str) -> PlatformResult<Article> {
        let title: String = text
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default()
            .chars()
            .take(MAX_DERIVED_TITLE_CHARS)
            .collect();
        Article::builder()
            .title(title)
            .body(text.trim())
            .build()
            .map_err(|e| PlatformError::new(PlatformErrorKind::Validation(e.to_string())))
    }

    /// JSON body for creating `article`.
    pub fn post_payload(article: &Article) -> Value {
        let mut payload = json!({
            "title": article.title(),
            "contentFormat": article.content_format().to_string(),
            "content": article.body(),
            "tags": Self::normalize_tags(article.tags()),
            "publishStatus": PUBLISH_STATUS,
            "notifyFollowers": false,
        });
        if let Some(url) = article.canonical_url().as_deref().filter(|u| !u.trim().is_empty()) {
            payload["canonicalUrl"] = json!(url);
        }
        payload
    }

    fn validate(article: &Article) -> PlatformResult<()> {
        if article.title().trim().is_empty() {
            return Err(PlatformError::new(PlatformErrorKind::Validation(
                "Medium post title is empty".to_string(),
            )));
        }
        if article.body().trim().is_empty() {
            return Err(PlatformError::new(PlatformErrorKind::Validation(
                "Medium post content is empty".to_string(),
            )));
        }
        Ok(())
    }

    async fn try_test_connection(&self) -> PlatformResult<String> {
        let credentials = self.credentials()?;
        let request = self
            .client
            .get(format!("{}/me", self.base_url))
            .bearer_auth(&credentials.integration_token)
            .header(reqwest::header::ACCEPT, "application/json");
        let response = http::send(PlatformKind::Medium, request).await?;
        let body = http::read_json(PlatformKind::Medium, response, extract_error).await?;
        str_at(&body, "/data/username")
            .or_else(|| str_at(&body, "/data/name"))
            .ok_or_else(|| {
                PlatformError::new(PlatformErrorKind::ResponseParsing(
                    "missing data.username".to_string(),
                ))
            })
    }

    async fn try_publish(&self, content: &PostContent) -> PlatformResult<Value> {
        let credentials = self.credentials()?;
        let article = match content {
            PostContent::Article(article) => article.clone(),
            PostContent::Status { text, media } => {
                if let Some(media) = media {
                    warn!(media_url = %media.url(), "Medium media attachments not supported, omitted");
                }
                Self::article_from_status(text)?
            }
        };
        Self::validate(&article)?;

        let target = credentials.target();
        let url = format!("{}/{}", self.base_url, target.posts_path());
        debug!(?target, title = %article.title(), "Creating Medium draft");

        let request = self
            .client
            .post(&url)
            .bearer_auth(&credentials.integration_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&Self::post_payload(&article));
        let response = http::send(PlatformKind::Medium, request).await?;
        let body = http::read_json(PlatformKind::Medium, response, extract_error).await?;
        body.get("data").cloned().ok_or_else(|| {
            PlatformError::new(PlatformErrorKind::ResponseParsing(
                "missing data in post response".to_string(),
            ))
        })
    }
}

/// Medium errors: `errors[0].message`.
fn extract_error(value: &Value) -> Option<String> {
    str_at(value, "/errors/0/message")
}

#[async_trait]
impl PlatformAdapter for MediumAdapter {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Medium
    }

    fn is_ready(&self) -> bool {
        self.credentials.is_some()
    }

    #[instrument(skip(self), fields(platform = "medium"))]
    async fn test_connection(&self) -> ConnectionStatus {
        match self.try_test_connection().await {
            Ok(identity) => {
                info!(%identity, "Medium connection verified");
                ConnectionStatus::connected(identity)
            }
            Err(e) => {
                warn!(error = %e.kind, "Medium connection test failed");
                ConnectionStatus::failed(e.kind.to_string())
            }
        }
    }

    #[instrument(skip(self, content), fields(platform = "medium"))]
    async fn publish(&self, content: &PostContent) -> PublishOutcome {
        match self.try_publish(content).await {
            Ok(data) => {
                info!(id = ?data.get("id"), url = ?data.get("url"), "Medium draft created");
                PublishOutcome::succeeded(data)
            }
            Err(e) => {
                warn!(error = %e.kind, "Medium draft not created");
                PublishOutcome::failed(e.kind.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pressroom_core::ContentFormat;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_tags() {
        let normalized = MediumAdapter::normalize_tags(&tags(&[
            " finance ", "", "settlements", "   ", "annuities", "lump-sum", "taxes", "extra",
        ]));
        assert_eq!(
            normalized,
            tags(&["finance", "settlements", "annuities", "lump-sum", "taxes"])
        );
    }

    #[test]
    fn test_target_selection() {
        let credentials = MediumCredentials::new("token", "author-1");
        assert_eq!(credentials.target().posts_path(), "users/author-1/posts");
        let credentials = credentials.with_publication("pub-9");
        assert_eq!(credentials.target().posts_path(), "publications/pub-9/posts");
        let credentials = MediumCredentials::new("token", "author-1").with_publication("  ");
        assert_eq!(credentials.target(), MediumTarget::User("author-1".to_string()));
    }

    #[test]
    fn test_post_payload_is_always_draft() {
        let article = Article::builder()
            .title("Selling payments")
            .body("<p>Body</p>")
            .content_format(ContentFormat::Html)
            .tags(tags(&["a", "b"]))
            .canonical_url(Some("https://example.com/selling".to_string()))
            .build()
            .expect("valid article");
        let payload = MediumAdapter::post_payload(&article);
        assert_eq!(payload["publishStatus"], "draft");
        assert_eq!(payload["contentFormat"], "html");
        assert_eq!(payload["canonicalUrl"], "https://example.com/selling");
        assert_eq!(payload["tags"], json!(["a", "b"]));
        assert_eq!(payload["notifyFollowers"], false);
    }

    #[test]
    fn test_article_from_status() {
        let article = MediumAdapter::article_from_status("\n  First line title\nMore text")
            .expect("article");
        assert_eq!(article.title(), "First line title");
        assert_eq!(article.body(), "First line title\nMore text");
    }
}
