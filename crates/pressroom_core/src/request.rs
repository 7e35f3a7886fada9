//! Publish requests accepted by the publishers.

use crate::{Article, Media, MediaType, PlatformKind, PostContent};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Social post request.
///
/// `platform` is kept as the caller's raw key so that unknown platforms can be
/// skipped instead of rejected.
#[derive(
    Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct PostRequest {
    /// Post text.
    content: String,

    /// Platform key (`x`, `facebook`, `linkedin`, `medium`).
    platform: String,

    /// Optional media URL.
    #[builder(default)]
    #[serde(default)]
    media_url: Option<String>,

    /// Type of the media at `media_url`.
    #[builder(default)]
    #[serde(default)]
    media_type: Option<MediaType>,
}

impl PostRequest {
    /// Creates a new builder for PostRequest.
    pub fn builder() -> PostRequestBuilder {
        PostRequestBuilder::default()
    }

    /// Text-only request.
    pub fn text(content: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            platform: platform.into(),
            media_url: None,
            media_type: None,
        }
    }

    /// Parsed platform, `None` when the key is not recognized.
    pub fn platform_kind(&self) -> Option<PlatformKind> {
        PlatformKind::from_key(&self.platform)
    }

    /// Attachment assembled from the media fields.
    pub fn media(&self) -> Option<Media> {
        Media::from_parts(self.media_url.as_deref(), self.media_type)
    }

    /// Adapter payload for this request.
    pub fn to_content(&self) -> PostContent {
        PostContent::Status {
            text: self.content.clone(),
            media: self.media(),
        }
    }
}

/// Article request.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ArticleRequest {
    /// The article to publish.
    article: Article,

    /// Platform key.
    platform: String,
}

impl ArticleRequest {
    /// Creates a new builder for ArticleRequest.
    pub fn builder() -> ArticleRequestBuilder {
        ArticleRequestBuilder::default()
    }

    /// Request for `article` on `platform`.
    pub fn new(article: Article, platform: impl Into<String>) -> Self {
        Self {
            article,
            platform: platform.into(),
        }
    }

    /// Parsed platform, `None` when the key is not recognized.
    pub fn platform_kind(&self) -> Option<PlatformKind> {
        PlatformKind::from_key(&self.platform)
    }

    /// Adapter payload for this request.
    pub fn to_content(&self) -> PostContent {
        PostContent::Article(self.article.clone())
    }
}
