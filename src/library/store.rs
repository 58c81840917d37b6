//! The content store: authoritative, ordered list of items.
//!
//! Mutation goes through [`ContentStore::add`] and
//! [`ContentStore::remove`] only. The tag index is kept in step with every
//! mutation so readers never see a half-applied change.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, warn};

use super::filter::{Query, SearchOptions};
use super::tags::TagIndex;
use crate::domain::{ContentId, ContentItem, NewContent, ValidationError};

/// In-memory content store
#[derive(Debug, Clone)]
pub struct ContentStore {
    items: Vec<ContentItem>,
    tags: TagIndex,
    /// Next id to hand out; always greater than any id seen so far
    next_id: u64,
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            tags: TagIndex::new(),
            next_id: 1,
        }
    }

    /// Rebuild a store from previously stored items.
    ///
    /// Every item is re-validated and ids must be unique. `next_id` is
    /// raised past the largest id present if needed.
    pub fn from_items(
        items: Vec<ContentItem>,
        next_id: Option<u64>,
    ) -> Result<Self, ValidationError> {
        let mut store = Self::new();
        store.next_id = next_id.unwrap_or(1).max(1);

        for mut item in items {
            item.validate()?;
            if store.get(item.id).is_some() {
                return Err(ValidationError::DuplicateId(item.id));
            }
            store.next_id = store.next_id.max(item.id.get() + 1);
            store.tags.insert(&item);
            store.items.push(item);
        }

        Ok(store)
    }

    /// Validate a candidate and append it.
    ///
    /// On error the store is left untouched.
    pub fn add(&mut self, candidate: NewContent) -> Result<ContentItem, ValidationError> {
        let id = match candidate.id {
            Some(id) if self.get(id).is_some() => return Err(ValidationError::DuplicateId(id)),
            Some(id) => id,
            None => ContentId::new(self.next_id),
        };

        let item = candidate.build(id, Utc::now())?;

        self.next_id = self.next_id.max(id.get() + 1);
        self.tags.insert(&item);
        self.items.push(item.clone());

        debug!(id = %item.id, content_type = %item.content_type(), "Added content");
        Ok(item)
    }

    /// Remove an item by id. Unknown ids are ignored.
    pub fn remove(&mut self, id: ContentId) -> Option<ContentItem> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        let removed = self.items.remove(pos);
        self.tags.remove(&removed, &self.items);

        debug!(id = %id, "Removed content");
        Some(removed)
    }

    /// All items, insertion order
    pub fn list(&self) -> &[ContentItem] {
        &self.items
    }

    /// Get an item by ID
    pub fn get(&self, id: ContentId) -> Option<&ContentItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Distinct tags across all items, first-seen order
    pub fn all_tags(&self) -> Vec<&str> {
        self.tags.tags().collect()
    }

    /// The live tag index
    pub fn tag_index(&self) -> &TagIndex {
        &self.tags
    }

    /// Items matching `query`, store order
    pub fn query(&self, query: &Query, options: SearchOptions) -> Vec<&ContentItem> {
        query.apply(&self.items, options)
    }

    /// Id the next auto-assigned item will get
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Get the number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Thread-safe handle to a single [`ContentStore`].
///
/// Each call takes the lock once, so every read sees a consistent
/// snapshot. Reads return owned data.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<ContentStore>>,
}

impl SharedStore {
    pub fn new(store: ContentStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn add(&self, candidate: NewContent) -> Result<ContentItem, ValidationError> {
        self.lock().add(candidate)
    }

    pub fn remove(&self, id: ContentId) -> Option<ContentItem> {
        self.lock().remove(id)
    }

    pub fn list(&self) -> Vec<ContentItem> {
        self.lock().list().to_vec()
    }

    pub fn all_tags(&self) -> Vec<String> {
        self.lock().all_tags().into_iter().map(str::to_string).collect()
    }

    pub fn query(&self, query: &Query, options: SearchOptions) -> Vec<ContentItem> {
        self.lock().query(query, options).into_iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Run `f` with exclusive access to the store
    pub fn with<R>(&self, f: impl FnOnce(&mut ContentStore) -> R) -> R {
        f(&mut self.lock())
    }

    // Mutations validate before touching state, so a poisoned store is
    // still consistent.
    fn lock(&self) -> MutexGuard<'_, ContentStore> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("Content store lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }
}
