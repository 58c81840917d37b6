//! The content library: store, tag index, and search.
//!
//! # Layout
//!
//! - `store`: authoritative item list (`add` / `remove` / `list`)
//! - `tags`: distinct tags, first-seen order
//! - `filter`: text + tag filtering
//! - `share`: public share links
//! - `snapshot`: JSON file the CLI keeps between runs
//!
//! ```text
//! ~/.brainly/
//! ├── config.yaml   # optional, see crate::config
//! └── brain.json    # Snapshot: items, next id, share state
//! ```

pub mod filter;
pub mod seed;
pub mod share;
pub mod snapshot;
pub mod store;
pub mod tags;

pub use filter::{filter, matches_text, Query, SearchOptions, TagSelection};
pub use seed::demo_content;
pub use share::{ShareState, DEFAULT_SHARE_BASE_URL};
pub use snapshot::Snapshot;
pub use store::{ContentStore, SharedStore};
pub use tags::{all_tags, TagIndex};
