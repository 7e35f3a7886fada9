//! X (Twitter) API v2 adapter.

mod oauth;

use crate::credentials::{REDACTED, lookup_value};
use crate::http::{self, str_at};
use crate::PlatformAdapter;
use async_trait::async_trait;
use chrono::Utc;
use derive_getters::Getters;
use pressroom_core::{ConnectionStatus, PlatformKind, PostContent, PublishOutcome};
use pressroom_error::{PlatformError, PlatformErrorKind, PlatformResult};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

/// Maximum tweet length in characters.
pub const X_MAX_TWEET_LENGTH: usize = 280;

const DEFAULT_BASE_URL: &str = "https://api.twitter.com";

/// OAuth 1.0a user-context credentials.
#[derive(Clone, Getters, Deserialize)]
pub struct XCredentials {
    /// Consumer (API) key
    api_key: String,
    /// Consumer (API) secret
    api_secret: String,
    /// User access token
    access_token: String,
    /// User access token secret
    access_secret: String,
}

impl XCredentials {
    /// Create a credential set.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            access_token: access_token.into(),
            access_secret: access_secret.into(),
        }
    }

    /// Read `TWITTER_API_KEY`, `TWITTER_API_SECRET`, `TWITTER_ACCESS_TOKEN`
    /// and `TWITTER_ACCESS_SECRET`; `None` unless all four are set.
    pub fn from_lookup<F>(lookup: &F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Some(Self {
            api_key: lookup_value(lookup, "TWITTER_API_KEY")?,
            api_secret: lookup_value(lookup, "TWITTER_API_SECRET")?,
            access_token: lookup_value(lookup, "TWITTER_ACCESS_TOKEN")?,
            access_secret: lookup_value(lookup, "TWITTER_ACCESS_SECRET")?,
        })
    }
}

impl std::fmt::Debug for XCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XCredentials")
            .field("api_key", &REDACTED)
            .field("api_secret", &REDACTED)
            .field("access_token", &REDACTED)
            .field("access_secret", &REDACTED)
            .finish()
    }
}

/// Adapter for posting tweets through X API v2.
///
/// Media attachments are not uploaded; the tweet is posted with its text only.
#[derive(Debug, Clone)]
pub struct XAdapter {
    client: Client,
    credentials: Option<XCredentials>,
    base_url: String,
}

impl XAdapter {
    /// Create an adapter; `None` credentials make it permanently not ready.
    pub fn new(credentials: Option<XCredentials>) -> Self {
        Self::with_client(Client::new(), credentials)
    }

    /// Create an adapter sharing an existing HTTP client.
    pub fn with_client(client: Client, credentials: Option<XCredentials>) -> Self {
        debug!(ready = credentials.is_some(), "Created X adapter");
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

    /// Check tweet text against the platform limits.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error for empty text or text longer than
    /// [`X_MAX_TWEET_LENGTH`] characters.
    pub fn validate_text(text: &str) -> PlatformResult<()> {
        let length = text.chars().count();
        if text.trim().is_empty() {
            return Err(PlatformError::new(PlatformErrorKind::Validation(
                "Tweet text is empty".to_string(),
            )));
        }
        if length > X_MAX_TWEET_LENGTH {
            return Err(PlatformError::new(PlatformErrorKind::Validation(format!(
                "Tweet is too long ({} characters, max {})",
                length, X_MAX_TWEET_LENGTH
            ))));
        }
        Ok(())
    }

    fn credentials(&self) -> PlatformResult<&XCredentials> {
        self.credentials.as_ref().ok_or_else(|| {
            PlatformError::new(PlatformErrorKind::NotConfigured(
                PlatformKind::X.display_name().to_string(),
            ))
        })
    }

    fn signed(&self, method: reqwest::Method, url: &str) -> PlatformResult<reqwest::RequestBuilder> {
        let credentials = self.credentials()?;
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let header = oauth::authorization_header(
            credentials,
            method.as_str(),
            url,
            &[],
            &nonce,
            Utc::now().timestamp(),
        )?;
        Ok(self
            .client
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, header))
    }

    async fn try_test_connection(&self) -> PlatformResult<String> {
        let url = format!("{}/2/users/me", self.base_url);
        let request = self.signed(reqwest::Method::GET, &url)?;
        let response = http::send(PlatformKind::X, request).await?;
        let body = http::read_json(PlatformKind::X, response, extract_error).await?;
        str_at(&body, "/data/username")
            .map(|username| format!("@{}", username))
            .ok_or_else(|| {
                PlatformError::new(PlatformErrorKind::ResponseParsing(
                    "missing data.username".to_string(),
                ))
            })
    }

    async fn try_publish(&self, content: &PostContent) -> PlatformResult<Value> {
        self.credentials()?;
        let text = content.text();
        Self::validate_text(&text)?;

        if let Some(media) = content.media() {
            warn!(media_url = %media.url(), "X media upload not supported, posting text only");
        }

        let url = format!("{}/2/tweets", self.base_url);
        let request = self
            .signed(reqwest::Method::POST, &url)?
            .json(&json!({ "text": text }));
        debug!(chars = text.chars().count(), "Posting tweet");

        let response = http::send(PlatformKind::X, request).await?;
        let body = http::read_json(PlatformKind::X, response, extract_error).await?;
        body.get("data").cloned().ok_or_else(|| {
            PlatformError::new(PlatformErrorKind::ResponseParsing(
                "missing data in tweet response".to_string(),
            ))
        })
    }
}

/// X v2 errors: `detail`, then `errors[0].message`, then `title`.
fn extract_error(value: &Value) -> Option<String> {
    str_at(value, "/detail")
        .or_else(|| str_at(value, "/errors/0/message"))
        .or_else(|| str_at(value, "/title"))
}

#[async_trait]
impl PlatformAdapter for XAdapter {
    fn kind(&self) -> PlatformKind {
        PlatformKind::X
    }

    fn is_ready(&self) -> bool {
        self.credentials.is_some()
    }

    #[instrument(skip(self), fields(platform = "x"))]
    async fn test_connection(&self) -> ConnectionStatus {
        match self.try_test_connection().await {
            Ok(identity) => {
                info!(%identity, "X connection verified");
                ConnectionStatus::connected(identity)
            }
            Err(e) => {
                warn!(error = %e.kind, "X connection test failed");
                ConnectionStatus::failed(e.kind.to_string())
            }
        }
    }

    #[instrument(skip(self, content), fields(platform = "x"))]
    async fn publish(&self, content: &PostContent) -> PublishOutcome {
        match self.try_publish(content).await {
            Ok(data) => {
                info!(id = ?data.get("id"), "Tweet posted");
                PublishOutcome::succeeded(data)
            }
            Err(e) => {
                warn!(error = %e.kind, "Tweet not posted");
                PublishOutcome::failed(e.kind.to_string())
            }
        }
    }
}
