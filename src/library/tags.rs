//! Tag index over the items in a store.
//!
//! Tags are listed in first-seen order: items in store order, tags in item
//! order. [`all_tags`] recomputes that from scratch; [`TagIndex`] keeps it
//! up to date as items come and go.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::ContentItem;

/// Distinct tags across `items`, first-seen order
pub fn all_tags(items: &[ContentItem]) -> Vec<&str> {
    let mut tags: Vec<&str> = Vec::new();
    for tag in items.iter().flat_map(|item| item.tags.iter()) {
        if !tags.contains(&tag.as_str()) {
            tags.push(tag);
        }
    }
    tags
}

/// Reference-counted tag index.
///
/// Each tag maps to the number of stored items carrying it; a tag leaves
/// the index when its count reaches zero.
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a full item list
    pub fn build(items: &[ContentItem]) -> Self {
        let mut index = Self::new();
        for item in items {
            index.insert(item);
        }
        index
    }

    /// Account for an item appended to the store
    pub fn insert(&mut self, item: &ContentItem) {
        for tag in &item.tags {
            let count = self.counts.entry(tag.clone()).or_insert(0);
            if *count == 0 {
                self.order.push(tag.clone());
            }
            *count += 1;
        }
    }

    /// Account for an item removed from the store.
    ///
    /// `remaining` is the store contents after removal. If the removed item
    /// introduced a tag that other items still carry, that tag's first-seen
    /// position may move, so the order is rebuilt from `remaining`.
    pub fn remove(&mut self, item: &ContentItem, remaining: &[ContentItem]) {
        let mut survivors = false;

        for tag in &item.tags {
            match self.counts.get_mut(tag) {
                Some(count) if *count > 1 => {
                    *count -= 1;
                    survivors = true;
                }
                Some(_) => {
                    self.counts.remove(tag);
                    self.order.retain(|t| t != tag);
                }
                None => {}
            }
        }

        if survivors {
            debug!(item_id = %item.id, "Rebuilding tag order after removal");
            self.order = all_tags(remaining).into_iter().map(str::to_string).collect();
        }
    }

    /// Tags in first-seen order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of items carrying `tag`
    pub fn count(&self, tag: &str) -> usize {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.counts.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContentId, ContentKind};
    use chrono::Utc;

    fn item(id: u64, tags: &[&str]) -> ContentItem {
        ContentItem {
            id: ContentId::new(id),
            title: format!("Item {}", id),
            kind: ContentKind::Link {
                link: format!("https://example.com/{}", id),
            },
            tags: tags.iter().map(|t| t.to_string()).collect(),
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_all_tags_first_seen_order() {
        let items = vec![
            item(1, &["productivity", "learning"]),
            item(2, &["education", "science"]),
            item(3, &["productivity", "PKM"]),
        ];

        assert_eq!(
            all_tags(&items),
            vec!["productivity", "learning", "education", "science", "PKM"]
        );
    }

    #[test]
    fn test_all_tags_empty() {
        assert!(all_tags(&[]).is_empty());
        assert!(all_tags(&[item(1, &[])]).is_empty());
    }

    #[test]
    fn test_index_counts() {
        let items = vec![item(1, &["x", "y"]), item(2, &["y"])];
        let index = TagIndex::build(&items);

        assert_eq!(index.count("x"), 1);
        assert_eq!(index.count("y"), 2);
        assert_eq!(index.count("z"), 0);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_remove_drops_unreferenced_tags() {
        let mut items = vec![item(1, &["x", "y"]), item(2, &["y"])];
        let mut index = TagIndex::build(&items);

        let removed = items.remove(0);
        index.remove(&removed, &items);

        assert!(!index.contains("x"));
        assert_eq!(index.count("y"), 1);
        assert_eq!(index.tags().collect::<Vec<_>>(), vec!["y"]);
    }

    #[test]
    fn test_remove_reorders_surviving_tags() {
        let mut items = vec![item(1, &["x"]), item(2, &["y", "x"])];
        let mut index = TagIndex::build(&items);
        assert_eq!(index.tags().collect::<Vec<_>>(), vec!["x", "y"]);

        let removed = items.remove(0);
        index.remove(&removed, &items);

        assert_eq!(index.tags().collect::<Vec<_>>(), all_tags(&items));
        assert_eq!(index.tags().collect::<Vec<_>>(), vec!["y", "x"]);
    }

    #[test]
    fn test_readded_tag_goes_last() {
        let mut items = vec![item(1, &["x"]), item(2, &["y"])];
        let mut index = TagIndex::build(&items);

        let removed = items.remove(0);
        index.remove(&removed, &items);

        let added = item(3, &["x"]);
        index.insert(&added);
        items.push(added);

        assert_eq!(index.tags().collect::<Vec<_>>(), vec!["y", "x"]);
        assert_eq!(index.tags().collect::<Vec<_>>(), all_tags(&items));
    }
}
