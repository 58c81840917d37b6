//! Domain types for brainly.
//!
//! This module contains the core data structures:
//! - Content: stored items and the content-kind sum type
//! - Candidate: add requests and their validation errors

pub mod candidate;
pub mod content;

// Re-export commonly used types
pub use candidate::{normalize_tags, parse_tag_list, NewContent, ValidationError};
pub use content::{ContentId, ContentItem, ContentKind, ContentType};
