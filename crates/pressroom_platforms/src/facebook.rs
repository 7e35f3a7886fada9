//! Facebook Graph API page adapter.

use crate::credentials::{REDACTED, lookup_value};
use crate::http::{self, str_at};
use crate::PlatformAdapter;
use async_trait::async_trait;
use derive_getters::Getters;
use pressroom_core::{ConnectionStatus, MediaType, PlatformKind, PostContent, PublishOutcome};
use pressroom_error::{PlatformError, PlatformErrorKind, PlatformResult};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

const DEFAULT_GRAPH_VERSION: &str = "v18.0";
const GRAPH_HOST: &str = "https://graph.facebook.com";

/// Page access credentials.
#[derive(Clone, Getters, Deserialize)]
pub struct FacebookCredentials {
    /// Long-lived page access token
    page_access_token: String,
    /// Page to publish to
    page_id: String,
    /// Graph API version, e.g. `v18.0`
    #[serde(default = "default_graph_version")]
    graph_version: String,
}

fn default_graph_version() -> String {
    DEFAULT_GRAPH_VERSION.to_string()
}

impl FacebookCredentials {
    /// Create a credential set using the default Graph API version.
    pub fn new(page_access_token: impl Into<String>, page_id: impl Into<String>) -> Self {
        Self {
            page_access_token: page_access_token.into(),
            page_id: page_id.into(),
            graph_version: default_graph_version(),
        }
    }

    /// Read `FACEBOOK_PAGE_ACCESS_TOKEN`, `FACEBOOK_PAGE_ID` and the optional
    /// `FACEBOOK_GRAPH_VERSION`.
    pub fn from_lookup<F>(lookup: &F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Some(Self {
            page_access_token: lookup_value(lookup, "FACEBOOK_PAGE_ACCESS_TOKEN")?,
            page_id: lookup_value(lookup, "FACEBOOK_PAGE_ID")?,
            graph_version: lookup_value(lookup, "FACEBOOK_GRAPH_VERSION")
                .unwrap_or_else(default_graph_version),
        })
    }
}

impl std::fmt::Debug for FacebookCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacebookCredentials")
            .field("page_access_token", &REDACTED)
            .field("page_id", &self.page_id)
            .field("graph_version", &self.graph_version)
            .finish()
    }
}

/// Page edge a post is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacebookEdge {
    /// Text post
    Feed,
    /// Image post
    Photos,
    /// Video post
    Videos,
}

impl FacebookEdge {
    /// Path segment of the edge.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Photos => "photos",
            Self::Videos => "videos",
        }
    }
}

/// Fully built publish request.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct FacebookRequest {
    /// Selected edge.
    edge: FacebookEdge,
    /// Path relative to the Graph API root, `{page_id}/{edge}`.
    path: String,
    /// JSON body, including the access token.
    payload: Value,
}

/// Adapter for posting to a Facebook page.
#[derive(Debug, Clone)]
pub struct FacebookAdapter {
    client: Client,
    credentials: Option<FacebookCredentials>,
    base_url: Option<String>,
}

impl FacebookAdapter {
    /// Create an adapter; `None` credentials make it permanently not ready.
    pub fn new(credentials: Option<FacebookCredentials>) -> Self {
        Self::with_client(Client::new(), credentials)
    }

    /// Create an adapter sharing an existing HTTP client.
    pub fn with_client(client: Client, credentials: Option<FacebookCredentials>) -> Self {
        debug!(ready = credentials.is_some(), "Created Facebook adapter");
        Self {
            client,
            credentials,
            base_url: None,
        }
    }

    /// Override the versioned Graph API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    fn credentials(&self) -> PlatformResult<&FacebookCredentials> {
        self.credentials.as_ref().ok_or_else(|| {
            PlatformError::new(PlatformErrorKind::NotConfigured(
                PlatformKind::Facebook.display_name().to_string(),
            ))
        })
    }

    fn graph_root(&self, credentials: &FacebookCredentials) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("{}/{}", GRAPH_HOST, credentials.graph_version))
    }

    /// Choose the edge and build the payload for `content`.
    ///
    /// Plain text goes to `feed` as `message`; images go to `photos` as
    /// `url` + `caption`; videos go to `videos` as `file_url` + `description`.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` when the adapter has no credentials.
    pub fn build_request(&self, content: &PostContent) -> PlatformResult<FacebookRequest> {
        let credentials = self.credentials()?;
        let text = content.text();
        let token = credentials.page_access_token.as_str();

        let (edge, payload) = match content.media() {
            None => (
                FacebookEdge::Feed,
                json!({ "message": text, "access_token": token }),
            ),
            Some(media) => match media.media_type() {
                MediaType::Image => (
                    FacebookEdge::Photos,
                    json!({ "url": media.url(), "caption": text, "access_token": token }),
                ),
                MediaType::Video => (
                    FacebookEdge::Videos,
                    json!({ "file_url": media.url(), "description": text, "access_token": token }),
                ),
            },
        };

        Ok(FacebookRequest {
            edge,
            path: format!("{}/{}", credentials.page_id, edge.as_str()),
            payload,
        })
    }

    async fn try_test_connection(&self) -> PlatformResult<String> {
        let credentials = self.credentials()?;
        let url = format!("{}/{}", self.graph_root(credentials), credentials.page_id);
        let request = self.client.get(&url).query(&[
            ("fields", "id,name"),
            ("access_token", credentials.page_access_token.as_str()),
        ]);
        let response = http::send(PlatformKind::Facebook, request).await?;
        let body = http::read_json(PlatformKind::Facebook, response, extract_error).await?;
        str_at(&body, "/name")
            .or_else(|| str_at(&body, "/id"))
            .ok_or_else(|| {
                PlatformError::new(PlatformErrorKind::ResponseParsing(
                    "missing page name".to_string(),
                ))
            })
    }

    async fn try_publish(&self, content: &PostContent) -> PlatformResult<Value> {
        let credentials = self.credentials()?;
        let request = self.build_request(content)?;
        let url = format!("{}/{}", self.graph_root(credentials), request.path);
        debug!(edge = request.edge.as_str(), "Posting to Facebook page");

        let response = http::send(
            PlatformKind::Facebook,
            self.client.post(&url).json(&request.payload),
        )
        .await?;
        http::read_json(PlatformKind::Facebook, response, extract_error).await
    }
}

/// Graph API errors: `error.message`.
fn extract_error(value: &Value) -> Option<String> {
    str_at(value, "/error/message")
}

#[async_trait]
impl PlatformAdapter for FacebookAdapter {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Facebook
    }

    fn is_ready(&self) -> bool {
        self.credentials.is_some()
    }

    #[instrument(skip(self), fields(platform = "facebook"))]
    async fn test_connection(&self) -> ConnectionStatus {
        match self.try_test_connection().await {
            Ok(identity) => {
                info!(%identity, "Facebook connection verified");
                ConnectionStatus::connected(identity)
            }
            Err(e) => {
                warn!(error = %e.kind, "Facebook connection test failed");
                ConnectionStatus::failed(e.kind.to_string())
            }
        }
    }

    #[instrument(skip(self, content), fields(platform = "facebook"))]
    async fn publish(&self, content: &PostContent) -> PublishOutcome {
        match self.try_publish(content).await {
            Ok(data) => {
                info!(id = ?data.get("id"), "Facebook post published");
                PublishOutcome::succeeded(data)
            }
            Err(e) => {
                warn!(error = %e.kind, "Facebook post not published");
                PublishOutcome::failed(e.kind.to_string())
            }
        }
    }
}
