//! Add candidates and their validation.
//!
//! A [`NewContent`] is what callers hand to the store; it only becomes a
//! [`ContentItem`] once every required field checks out.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::content::{ContentId, ContentItem, ContentKind, ContentType};

/// Errors raised when a candidate cannot become a stored item
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    EmptyTitle,

    #[error("A link is required for {content_type} content")]
    MissingLink { content_type: ContentType },

    #[error("A body is required for document content")]
    MissingBody,

    #[error("Unknown content type: {0}")]
    UnknownType(String),

    #[error("Content id already exists: {0}")]
    DuplicateId(ContentId),

    #[error("Content ids must be positive integers")]
    InvalidId,
}

/// A request to add content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContent {
    /// Caller-chosen id; the store assigns one when absent
    pub id: Option<ContentId>,

    pub content_type: ContentType,

    pub title: String,

    pub link: Option<String>,

    /// Markdown body (documents only)
    pub body: Option<String>,

    pub tags: Vec<String>,
}

impl NewContent {
    /// Start a candidate with a type and title
    pub fn new(content_type: ContentType, title: impl Into<String>) -> Self {
        Self {
            id: None,
            content_type,
            title: title.into(),
            link: None,
            body: None,
            tags: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: ContentId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add multiple tags
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Build the kind payload, checking the field the type requires.
    ///
    /// Link-carrying types ignore any body; documents keep a non-empty link
    /// if one was given.
    pub fn kind(&self) -> Result<ContentKind, ValidationError> {
        let link = trimmed(self.link.as_deref());
        let body = trimmed(self.body.as_deref());

        let kind = match self.content_type {
            ContentType::Document => ContentKind::Document {
                body: body.ok_or(ValidationError::MissingBody)?,
                link,
            },
            content_type => {
                let link = link.ok_or(ValidationError::MissingLink { content_type })?;
                match content_type {
                    ContentType::Tweet => ContentKind::Tweet { link },
                    ContentType::YouTube => ContentKind::YouTube { link },
                    _ => ContentKind::Link { link },
                }
            }
        };

        Ok(kind)
    }

    /// Validate everything except id uniqueness, which only the store can
    /// judge.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.build(ContentId::new(1), Utc::now()).map(|_| ())
    }

    /// Turn the candidate into an item with the given id
    pub(crate) fn build(
        &self,
        id: ContentId,
        added_at: DateTime<Utc>,
    ) -> Result<ContentItem, ValidationError> {
        if id.get() == 0 {
            return Err(ValidationError::InvalidId);
        }

        let title = trimmed(Some(&self.title)).ok_or(ValidationError::EmptyTitle)?;
        let kind = self.kind()?;

        Ok(ContentItem {
            id,
            title,
            kind,
            tags: normalize_tags(self.tags.iter().map(String::as_str)),
            added_at,
        })
    }
}

/// Trim every tag, drop empty ones, and keep only the first occurrence of
/// each.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Split a comma-separated tag list (as typed on the command line)
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    normalize_tags(raw.split(','))
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
