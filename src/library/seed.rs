//! Demo content for a fresh brain.

use crate::domain::{ContentType, NewContent};

/// The sample items shown on first launch
pub fn demo_content() -> Vec<NewContent> {
    vec![
        NewContent::new(ContentType::Document, "How to Take Smart Notes")
            .with_link("https://example.com/doc1")
            .with_body(
                "# Smart Notes\n\n\
                 Write fleeting notes, turn them into permanent notes, \
                 and link every note to what you already know.",
            )
            .with_tags(["productivity", "learning"]),
        NewContent::new(ContentType::YouTube, "The Science of Learning")
            .with_link("https://youtube.com/watch?v=123")
            .with_tags(["education", "science"]),
        NewContent::new(
            ContentType::Tweet,
            "Insights on Personal Knowledge Management",
        )
        .with_link("https://twitter.com/user/status/123")
        .with_tags(["productivity", "PKM"]),
        NewContent::new(ContentType::Link, "Best Note-Taking Methods")
            .with_link("https://medium.com/article-about-note-taking")
            .with_tags(["productivity", "creativity"]),
    ]
}
