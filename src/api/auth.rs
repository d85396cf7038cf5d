//! Authentication handling for the Backlog API.
//!
//! Backlog authenticates API-key clients through the `apiKey` query parameter.
//! The key is attached to every request URL, whatever the HTTP verb.

use std::fmt;

use reqwest::Url;

/// The query parameter name Backlog reads the key from.
const API_KEY_PARAM: &str = "apiKey";

/// A Backlog API key.
///
/// The raw key is never shown by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw API key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Append the key to a request URL as the last query parameter.
    pub fn apply(&self, url: &mut Url) {
        url.query_pairs_mut().append_pair(API_KEY_PARAM, &self.0);
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_appends_api_key() {
        let mut url = Url::parse("https://example.backlog.com/api/v2/space").unwrap();
        ApiKey::new("secret").apply(&mut url);
        assert_eq!(
            url.as_str(),
            "https://example.backlog.com/api/v2/space?apiKey=secret"
        );
    }

    #[test]
    fn test_apply_keeps_existing_query_first() {
        let mut url =
            Url::parse("https://example.backlog.com/api/v2/projects?archived=true").unwrap();
        ApiKey::new("secret").apply(&mut url);
        assert_eq!(url.query(), Some("archived=true&apiKey=secret"));
    }

    #[test]
    fn test_apply_encodes_key() {
        let mut url = Url::parse("https://example.backlog.com/api/v2/space").unwrap();
        ApiKey::new("a b&c").apply(&mut url);
        assert_eq!(url.query(), Some("apiKey=a+b%26c"));
    }

    #[test]
    fn test_api_key_does_not_expose_secret() {
        let key = ApiKey::new("secret_token");
        let debug_output = format!("{:?}", key);
        assert!(!debug_output.contains("secret_token"));
    }
}
