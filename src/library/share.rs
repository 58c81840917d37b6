//! Public share links.
//!
//! Sharing is a toggle: enabling it mints a random link, disabling it
//! forgets the link. Nothing is published anywhere; the link is only a
//! token the user can hand out.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default prefix for generated links
pub const DEFAULT_SHARE_BASE_URL: &str = "https://brainly.app/shared";

/// Length of the random token at the end of a link
pub const TOKEN_LEN: usize = 9;

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Sharing state of a brain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    enabled_at: Option<DateTime<Utc>>,
}

impl ShareState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn sharing on with a freshly generated link.
    ///
    /// Calling this while already enabled replaces the old link.
    pub fn enable(&mut self, base_url: &str) -> &str {
        let link = format!("{}/{}", base_url.trim_end_matches('/'), generate_token());
        self.enabled_at = Some(Utc::now());
        self.link.insert(link).as_str()
    }

    /// Turn sharing off. Returns the link that was active, if any.
    pub fn disable(&mut self) -> Option<String> {
        self.enabled_at = None;
        self.link.take()
    }

    pub fn is_enabled(&self) -> bool {
        self.link.is_some()
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn enabled_at(&self) -> Option<DateTime<Utc>> {
        self.enabled_at
    }
}

/// Random `[0-9a-z]` token of [`TOKEN_LEN`] characters
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LEN)
        .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_enable_and_disable() {
        let mut share = ShareState::new();
        assert!(!share.is_enabled());

        let link = share.enable(DEFAULT_SHARE_BASE_URL).to_string();
        assert!(link.starts_with("https://brainly.app/shared/"));
        assert_eq!(link.len(), DEFAULT_SHARE_BASE_URL.len() + 1 + TOKEN_LEN);
        assert!(share.is_enabled());
        assert!(share.enabled_at().is_some());

        assert_eq!(share.disable(), Some(link));
        assert!(!share.is_enabled());
        assert!(share.link().is_none());
        assert!(share.disable().is_none());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let mut share = ShareState::new();
        let link = share.enable("https://example.org/s/").to_string();
        assert!(link.starts_with("https://example.org/s/"));
        assert!(!link.contains("//s//"));
        assert_eq!(link.len(), "https://example.org/s/".len() + TOKEN_LEN);
    }
}
