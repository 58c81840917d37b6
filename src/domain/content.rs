//! Content items stored in a brain.
//!
//! A [`ContentItem`] pairs display metadata (title, tags) with a
//! [`ContentKind`], the sum type that decides which fields a given kind of
//! content must carry.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::candidate::ValidationError;

/// Content identifier, unique within a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(u64);

impl ContentId {
    /// Wrap a raw id. Zero is never assigned by a store.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for ContentId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .ok()
            .filter(|raw| *raw > 0)
            .map(Self)
            .ok_or(ValidationError::InvalidId)
    }
}

/// Type of content (discriminant of [`ContentKind`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// Free-form note with a markdown body
    Document,

    /// Tweet / X post
    Tweet,

    /// YouTube video
    #[serde(rename = "youtube")]
    YouTube,

    /// Any other web link
    Link,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Document,
        ContentType::Tweet,
        ContentType::YouTube,
        ContentType::Link,
    ];

    /// Guess the content type of a URL.
    ///
    /// Only link-carrying types are ever returned; a bare URL is never a
    /// document.
    pub fn detect(url: &str) -> Self {
        let url_lower = url.to_lowercase();
        if url_lower.contains("youtube.com") || url_lower.contains("youtu.be") {
            ContentType::YouTube
        } else if url_lower.contains("twitter.com")
            || url_lower.contains("://x.com")
            || url_lower.contains("www.x.com")
        {
            ContentType::Tweet
        } else {
            ContentType::Link
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            ContentType::Document => "document",
            ContentType::Tweet => "tweet",
            ContentType::YouTube => "youtube",
            ContentType::Link => "link",
        })
    }
}

impl std::str::FromStr for ContentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "document" | "doc" | "note" => Ok(ContentType::Document),
            "tweet" | "twitter" | "x" => Ok(ContentType::Tweet),
            "youtube" | "yt" => Ok(ContentType::YouTube),
            "link" | "url" | "web" => Ok(ContentType::Link),
            _ => Err(ValidationError::UnknownType(s.to_string())),
        }
    }
}

/// Kind-specific payload of a content item.
///
/// Documents carry a body and may carry a link; every other kind carries
/// a link only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentKind {
    Document {
        body: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },
    Tweet {
        link: String,
    },
    #[serde(rename = "youtube")]
    YouTube {
        link: String,
    },
    Link {
        link: String,
    },
}

impl ContentKind {
    /// Discriminant of this kind
    pub fn content_type(&self) -> ContentType {
        match self {
            ContentKind::Document { .. } => ContentType::Document,
            ContentKind::Tweet { .. } => ContentType::Tweet,
            ContentKind::YouTube { .. } => ContentType::YouTube,
            ContentKind::Link { .. } => ContentType::Link,
        }
    }

    /// The link, if this kind has one
    pub fn link(&self) -> Option<&str> {
        match self {
            ContentKind::Document { link, .. } => link.as_deref(),
            ContentKind::Tweet { link }
            | ContentKind::YouTube { link }
            | ContentKind::Link { link } => Some(link),
        }
    }

    /// The document body, if any
    pub fn body(&self) -> Option<&str> {
        match self {
            ContentKind::Document { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Trim the link and body in place. A blank optional link becomes `None`.
    fn normalize(&mut self) {
        match self {
            ContentKind::Document { body, link } => {
                trim_in_place(body);
                if let Some(l) = link.as_mut() {
                    trim_in_place(l);
                }
                if link.as_deref().is_some_and(str::is_empty) {
                    *link = None;
                }
            }
            ContentKind::Tweet { link }
            | ContentKind::YouTube { link }
            | ContentKind::Link { link } => trim_in_place(link),
        }
    }

    /// Check that the required field for this kind is present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            ContentKind::Document { body, .. } if body.trim().is_empty() => {
                Err(ValidationError::MissingBody)
            }
            ContentKind::Document { .. } => Ok(()),
            ContentKind::Tweet { link }
            | ContentKind::YouTube { link }
            | ContentKind::Link { link } => {
                if link.trim().is_empty() {
                    Err(ValidationError::MissingLink {
                        content_type: self.content_type(),
                    })
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// A single stored piece of curated content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique identifier, immutable once assigned
    pub id: ContentId,

    /// Display title (trimmed, non-empty)
    pub title: String,

    /// Kind-specific payload
    #[serde(flatten)]
    pub kind: ContentKind,

    /// Distinct tags in display order
    #[serde(default)]
    pub tags: Vec<String>,

    /// When the item was added
    pub added_at: DateTime<Utc>,
}

impl ContentItem {
    pub fn content_type(&self) -> ContentType {
        self.kind.content_type()
    }

    pub fn link(&self) -> Option<&str> {
        self.kind.link()
    }

    pub fn body(&self) -> Option<&str> {
        self.kind.body()
    }

    /// Whether this item carries the exact tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Extract the video id from a YouTube item's link.
    ///
    /// Recognizes `youtube.com/watch?v=<id>` and `youtu.be/<id>`.
    pub fn youtube_video_id(&self) -> Option<&str> {
        let ContentKind::YouTube { link } = &self.kind else {
            return None;
        };

        youtube_pattern()
            .captures(link)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Embeddable player URL for YouTube items
    pub fn embed_url(&self) -> Option<String> {
        self.youtube_video_id()
            .map(|id| format!("https://www.youtube.com/embed/{}", id))
    }

    /// Re-check the invariants of an item that did not come through `add`
    /// (e.g. one loaded from disk). Title, link, body and tags are
    /// normalized in place the same way `add` normalizes a candidate.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        if self.id.get() == 0 {
            return Err(ValidationError::InvalidId);
        }
        trim_in_place(&mut self.title);
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        self.kind.normalize();
        self.kind.validate()?;
        self.tags = super::candidate::normalize_tags(std::mem::take(&mut self.tags));
        Ok(())
    }
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

fn youtube_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&\n?#]+)")
            .expect("static regex is valid")
    })
}
