//! brainly - a tagged bookmark index
//!
//! Captures documents, tweets, YouTube videos and links, tags them, and
//! answers searches over them.
//!
//! # Architecture
//!
//! - An in-memory [`ContentStore`] owns the items; `add` validates, `remove`
//!   is idempotent
//! - A reference-counted [`TagIndex`] tracks the distinct tags
//! - Filtering is a pure function of items, query text and selected tags
//!
//! # Modules
//!
//! - `domain`: Data structures (ContentItem, ContentKind, NewContent)
//! - `library`: Store, tag index, filter engine, share links, snapshot
//! - `config`: Config file / environment resolution
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! brainly add --title "The Science of Learning" --link https://youtu.be/123 --tags learning
//! brainly search notes --tag productivity
//! brainly rm 3
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod library;

// Re-export main types at crate root for convenience
pub use domain::{ContentId, ContentItem, ContentKind, ContentType, NewContent, ValidationError};
pub use library::{
    all_tags, filter, ContentStore, Query, SearchOptions, ShareState, SharedStore, Snapshot,
    TagIndex, TagSelection,
};
