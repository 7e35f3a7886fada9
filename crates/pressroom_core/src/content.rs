//! Content payloads handed to platform adapters.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Media types supported for attachments.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MediaType {
    /// Image (PNG, JPEG, GIF, etc.)
    Image,
    /// Video (MP4, MOV, etc.)
    Video,
}

/// Media attachment referenced by URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct Media {
    /// Publicly reachable URL of the media file.
    url: String,
    /// Type of media.
    media_type: MediaType,
}

impl Media {
    /// Create a media attachment.
    pub fn new(url: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            url: url.into(),
            media_type,
        }
    }

    /// Build an attachment from the loose `(url, type)` pair callers supply.
    ///
    /// A URL without a type is treated as an image; a type without a URL
    /// carries nothing to attach.
    pub fn from_parts(url: Option<&str>, media_type: Option<MediaType>) -> Option<Self> {
        let url = url.map(str::trim).filter(|u| !u.is_empty())?;
        Some(Self::new(url, media_type.unwrap_or(MediaType::Image)))
    }
}

/// Body markup used for long-form articles.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ContentFormat {
    /// Markdown body
    #[default]
    Markdown,
    /// HTML body
    Html,
}

/// Long-form article.
#[derive(
    Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct Article {
    /// Article title.
    title: String,

    /// Article body.
    body: String,

    /// Free-form tags; platforms apply their own limits.
    #[builder(default)]
    #[serde(default)]
    tags: Vec<String>,

    /// Original location of the article, when syndicated.
    #[builder(default)]
    #[serde(default)]
    canonical_url: Option<String>,

    /// Markup of `body`.
    #[builder(default)]
    #[serde(default)]
    content_format: ContentFormat,
}

impl Article {
    /// Creates a new builder for Article.
    pub fn builder() -> ArticleBuilder {
        ArticleBuilder::default()
    }

    /// Render the article as a plain status update.
    pub fn as_status_text(&self) -> String {
        format!("{}\n\n{}", self.title.trim(), self.body.trim())
    }
}

/// Payload handed to a platform adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::From)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PostContent {
    /// Short status update with optional media
    Status {
        /// Post text
        text: String,
        /// Optional attachment
        media: Option<Media>,
    },
    /// Long-form article
    #[from]
    Article(Article),
}

impl PostContent {
    /// Status update without media.
    pub fn status(text: impl Into<String>) -> Self {
        Self::Status {
            text: text.into(),
            media: None,
        }
    }

    /// Status update with an attachment.
    pub fn status_with_media(text: impl Into<String>, media: Media) -> Self {
        Self::Status {
            text: text.into(),
            media: Some(media),
        }
    }

    /// Text used by status-only platforms.
    pub fn text(&self) -> String {
        match self {
            Self::Status { text, .. } => text.clone(),
            Self::Article(article) => article.as_status_text(),
        }
    }

    /// Attached media, if any.
    pub fn media(&self) -> Option<&Media> {
        match self {
            Self::Status { media, .. } => media.as_ref(),
            Self::Article(_) => None,
        }
    }
}
