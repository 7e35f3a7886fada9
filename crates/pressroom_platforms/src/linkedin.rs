//! LinkedIn UGC post adapter.

use crate::credentials::{REDACTED, lookup_value};
use crate::http::{self, str_at};
use crate::PlatformAdapter;
use async_trait::async_trait;
use derive_getters::Getters;
use pressroom_core::{ConnectionStatus, PlatformKind, PostContent, PublishOutcome};
use pressroom_error::{PlatformError, PlatformErrorKind, PlatformResult};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

const DEFAULT_BASE_URL: &str = "https://api.linkedin.com";
const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";
const RESTLI_ID_HEADER: &str = "x-restli-id";

/// Organization page credentials.
#[derive(Clone, Getters, Deserialize)]
pub struct LinkedInCredentials {
    /// OAuth 2.0 access token with organization share permission
    access_token: String,
    /// Organization (company page) id or full URN
    organization_id: String,
}

impl LinkedInCredentials {
    /// Create a credential set.
    pub fn new(access_token: impl Into<String>, organization_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            organization_id: organization_id.into(),
        }
    }

    /// Read `LINKEDIN_ACCESS_TOKEN` and `LINKEDIN_ORGANIZATION_ID`.
    pub fn from_lookup<F>(lookup: &F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Some(Self {
            access_token: lookup_value(lookup, "LINKEDIN_ACCESS_TOKEN")?,
            organization_id: lookup_value(lookup, "LINKEDIN_ORGANIZATION_ID")?,
        })
    }

    /// Author URN for posts.
    pub fn author_urn(&self) -> String {
        if self.organization_id.starts_with("urn:li:") {
            self.organization_id.clone()
        } else {
            format!("urn:li:organization:{}", self.organization_id)
        }
    }
}

impl std::fmt::Debug for LinkedInCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedInCredentials")
            .field("access_token", &REDACTED)
            .field("organization_id", &self.organization_id)
            .finish()
    }
}

/// Adapter for sharing posts as a LinkedIn organization.
///
/// Media needs a register-upload round trip that is not implemented; posts
/// carrying an image or video are shared as text only.
#[derive(Debug, Clone)]
pub struct LinkedInAdapter {
    client: Client,
    credentials: Option<LinkedInCredentials>,
    base_url: String,
}

impl LinkedInAdapter {
    /// Create an adapter; `None` credentials make it permanently not ready.
    pub fn new(credentials: Option<LinkedInCredentials>) -> Self {
        Self::with_client(Client::new(), credentials)
    }

    /// Create an adapter sharing an existing HTTP client.
    pub fn with_client(client: Client, credentials: Option<LinkedInCredentials>) -> Self {
        debug!(ready = credentials.is_some(), "Created LinkedIn adapter");
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

    fn credentials(&self) -> PlatformResult<&LinkedInCredentials> {
        self.credentials.as_ref().ok_or_else(|| {
            PlatformError::new(PlatformErrorKind::NotConfigured(
                PlatformKind::LinkedIn.display_name().to_string(),
            ))
        })
    }

    /// UGC share payload for `text`.
    pub fn share_payload(author_urn: &str, text: &str) -> Value {
        json!({
            "author": author_urn,
            "lifecycleState": "PUBLISHED",
            "specificContent": {
                "com.linkedin.ugc.ShareContent": {
                    "shareCommentary": { "text": text },
                    "shareMediaCategory": "NONE",
                }
            },
            "visibility": { "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC" },
        })
    }

    /// Build the share payload for `content`.
    ///
    /// Attached media is logged and omitted.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` without credentials.
    pub fn build_request(&self, content: &PostContent) -> PlatformResult<Value> {
        let credentials = self.credentials()?;
        if let Some(media) = content.media() {
            warn!(
                media_url = %media.url(),
                media_type = %media.media_type(),
                "LinkedIn media upload not implemented, media omitted"
            );
        }
        Ok(Self::share_payload(&credentials.author_urn(), &content.text()))
    }

    async fn try_test_connection(&self) -> PlatformResult<String> {
        let credentials = self.credentials()?;
        let request = self
            .client
            .get(format!("{}/v2/people/~", self.base_url))
            .bearer_auth(&credentials.access_token)
            .header("X-Restli-Protocol-Version", RESTLI_PROTOCOL_VERSION);
        let response = http::send(PlatformKind::LinkedIn, request).await?;
        let body = http::read_json(PlatformKind::LinkedIn, response, extract_error).await?;

        let first = str_at(&body, "/localizedFirstName");
        let last = str_at(&body, "/localizedLastName");
        match (first, last) {
            (Some(first), Some(last)) => Ok(format!("{} {}", first, last)),
            (Some(name), None) | (None, Some(name)) => Ok(name),
            (None, None) => str_at(&body, "/id").ok_or_else(|| {
                PlatformError::new(PlatformErrorKind::ResponseParsing(
                    "missing profile name".to_string(),
                ))
            }),
        }
    }

    async fn try_publish(&self, content: &PostContent) -> PlatformResult<Value> {
        let payload = self.build_request(content)?;
        let credentials = self.credentials()?;
        debug!(author = %credentials.author_urn(), "Posting LinkedIn share");

        let request = self
            .client
            .post(format!("{}/v2/ugcPosts", self.base_url))
            .bearer_auth(&credentials.access_token)
            .header("X-Restli-Protocol-Version", RESTLI_PROTOCOL_VERSION)
            .json(&payload);
        let response = http::send(PlatformKind::LinkedIn, request).await?;
        let header_id = response
            .headers()
            .get(RESTLI_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = http::read_json(PlatformKind::LinkedIn, response, extract_error).await?;

        let id = header_id.or_else(|| str_at(&body, "/id")).ok_or_else(|| {
            PlatformError::new(PlatformErrorKind::ResponseParsing(
                "missing post id".to_string(),
            ))
        })?;
        Ok(json!({ "id": id }))
    }
}

/// LinkedIn errors: top-level `message`.
fn extract_error(value: &Value) -> Option<String> {
    str_at(value, "/message")
}

#[async_trait]
impl PlatformAdapter for LinkedInAdapter {
    fn kind(&self) -> PlatformKind {
        PlatformKind::LinkedIn
    }

    fn is_ready(&self) -> bool {
        self.credentials.is_some()
    }

    #[instrument(skip(self), fields(platform = "linkedin"))]
    async fn test_connection(&self) -> ConnectionStatus {
        match self.try_test_connection().await {
            Ok(identity) => {
                info!(%identity, "LinkedIn connection verified");
                ConnectionStatus::connected(identity)
            }
            Err(e) => {
                warn!(error = %e.kind, "LinkedIn connection test failed");
                ConnectionStatus::failed(e.kind.to_string())
            }
        }
    }

    #[instrument(skip(self, content), fields(platform = "linkedin"))]
    async fn publish(&self, content: &PostContent) -> PublishOutcome {
        match self.try_publish(content).await {
            Ok(data) => {
                info!(id = ?data.get("id"), "LinkedIn share published");
                PublishOutcome::succeeded(data)
            }
            Err(e) => {
                warn!(error = %e.kind, "LinkedIn share not published");
                PublishOutcome::failed(e.kind.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_urn() {
        assert_eq!(
            LinkedInCredentials::new("t", "12345").author_urn(),
            "urn:li:organization:12345"
        );
        assert_eq!(
            LinkedInCredentials::new("t", "urn:li:organization:9").author_urn(),
            "urn:li:organization:9"
        );
    }

    #[test]
    fn test_share_payload_text_only() {
        let payload = LinkedInAdapter::share_payload("urn:li:organization:1", "Hello");
        assert_eq!(payload["author"], "urn:li:organization:1");
        assert_eq!(payload["lifecycleState"], "PUBLISHED");
        let share = &payload["specificContent"]["com.linkedin.ugc.ShareContent"];
        assert_eq!(share["shareCommentary"]["text"], "Hello");
        assert_eq!(share["shareMediaCategory"], "NONE");
        assert!(share.get("media").is_none());
        assert_eq!(
            payload["visibility"]["com.linkedin.ugc.MemberNetworkVisibility"],
            "PUBLIC"
        );
    }
}
