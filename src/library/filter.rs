//! Search and tag filtering.
//!
//! Filtering is a pure function of the item list, the query text and the
//! selected tags, so it can be re-run on every keystroke. Results keep
//! store order.

use serde::{Deserialize, Serialize};

use crate::domain::ContentItem;

/// Knobs for the text rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Also match the query against tags (title-only when false)
    #[serde(default)]
    pub match_tags: bool,
}

impl SearchOptions {
    pub fn with_match_tags(mut self, match_tags: bool) -> Self {
        self.match_tags = match_tags;
        self
    }
}

/// The set of tags picked in a filter, in the order they were picked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSelection {
    tags: Vec<String>,
}

impl TagSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the tag if it is not selected, deselect it otherwise.
    ///
    /// Returns whether the tag is selected afterwards.
    pub fn toggle(&mut self, tag: &str) -> bool {
        if self.deselect(tag) {
            false
        } else {
            self.select(tag);
            true
        }
    }

    /// Select a tag; returns false if it was already selected
    pub fn select(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Deselect a tag; returns false if it was not selected
    pub fn deselect(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Tag rule: nothing selected, or the item carries any selected tag
    pub fn matches(&self, item: &ContentItem) -> bool {
        self.is_empty() || item.tags.iter().any(|t| self.contains(t))
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for tag in iter {
            selection.select(tag.as_ref());
        }
        selection
    }
}

/// Free-text query plus tag selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub tags: TagSelection,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tags: TagSelection::new(),
        }
    }

    /// Query matching everything
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.select(tag);
        self
    }

    pub fn with_tags(mut self, tags: TagSelection) -> Self {
        self.tags = tags;
        self
    }

    pub fn matches(&self, item: &ContentItem, options: SearchOptions) -> bool {
        matches_text(item, &self.text, options) && self.tags.matches(item)
    }

    /// Run the query over `items`
    pub fn apply<'a>(&self, items: &'a [ContentItem], options: SearchOptions) -> Vec<&'a ContentItem> {
        items
            .iter()
            .filter(|item| self.matches(item, options))
            .collect()
    }
}

/// Text rule: empty query, or a case-insensitive substring of the title
/// (or of a tag, with `match_tags`). Whitespace in the query is significant.
pub fn matches_text(item: &ContentItem, text: &str, options: SearchOptions) -> bool {
    let needle = text.to_lowercase();
    if needle.is_empty() {
        return true;
    }

    item.title.to_lowercase().contains(&needle)
        || (options.match_tags
            && item
                .tags
                .iter()
                .any(|t| t.to_lowercase().contains(&needle)))
}

/// Items satisfying both the text rule and the tag rule, in input order
pub fn filter<'a>(
    items: &'a [ContentItem],
    text: &str,
    selected: &TagSelection,
    options: SearchOptions,
) -> Vec<&'a ContentItem> {
    Query {
        text: text.to_string(),
        tags: selected.clone(),
    }
    .apply(items, options)
}
