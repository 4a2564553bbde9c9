//! URL extraction from free-form text
//!
//! Any line of input may carry zero or more URLs surrounded by arbitrary text
//! (log lines, HTML fragments, crawler output). Every maximal match of
//! [`URL_PATTERN`] is parsed with the `url` crate; matches that fail to parse
//! are logged and skipped while the rest of the line is still processed.

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

/// Case-insensitive URL grammar: scheme, optional userinfo, host (name or
/// bracketed IPv6), optional port, then path/query/fragment up to the first
/// whitespace or quote character.
pub const URL_PATTERN: &str = concat!(
    r#"(?i)(?:(?:https?|ftp|smtp|unknown|sftp|file|data|telnet|ssh|ws|wss|git|svn|gopher)://)"#,
    r#"(?:(?:[^\s:@'"]+(?::[^\s:@'"]*)?@)?"#,
    r#"(?:[_A-Z0-9.-]+|\[[_A-F0-9]*:[_A-F0-9:]+\])"#,
    r#"(?::[0-9]{1,5})?)"#,
    r#"(?:/[^\s'"]*)?(?:\?[^\s'"]*)?(?:#[^\s'"]*)?"#,
);

lazy_static! {
    static ref URL_REGEX: Regex = Regex::new(URL_PATTERN).expect("URL pattern must compile");
}

/// A URL found in the input, kept exactly as written.
#[derive(Debug, Clone)]
pub struct ExtractedUrl<'a> {
    raw: &'a str,
    parsed: Url,
}

impl<'a> ExtractedUrl<'a> {
    /// Parse a matched substring.
    pub fn parse(raw: &'a str) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(raw)?;
        Ok(Self { raw, parsed })
    }

    /// The matched text, unnormalized.
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// The normalized form, for callers that need host, path or query parts.
    pub fn parsed(&self) -> &Url {
        &self.parsed
    }

    /// Whether the URL carries a non-empty query string.
    /// A bare trailing `?` does not count.
    pub fn has_query(&self) -> bool {
        self.parsed.query().is_some_and(|query| !query.is_empty())
    }
}

/// Result of scanning one line of text.
#[derive(Debug, Default)]
pub struct Extraction<'a> {
    pub urls: Vec<ExtractedUrl<'a>>,
    /// Matches rejected by the URL parser
    pub skipped: usize,
}

/// Raw pattern matches in order of appearance, without parsing.
pub fn find_matches(text: &str) -> impl Iterator<Item = &str> {
    URL_REGEX.find_iter(text).map(|m| m.as_str())
}

/// Extract and parse every URL in `text`.
///
/// Duplicates are returned as many times as they occur.
pub fn extract_urls(text: &str) -> Extraction<'_> {
    let mut extraction = Extraction::default();

    for raw in find_matches(text) {
        match ExtractedUrl::parse(raw) {
            Ok(url) => extraction.urls.push(url),
            Err(e) => {
                tracing::warn!("Error parsing URL {}: {}", raw, e);
                extraction.skipped += 1;
            }
        }
    }

    extraction
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_urls(text: &str) -> Vec<&str> {
        extract_urls(text).urls.iter().map(|u| u.as_str()).collect()
    }

    #[test]
    fn test_extracts_multiple_urls_from_prose() {
        assert_eq!(
            raw_urls("see http://a.com and http://b.com"),
            vec!["http://a.com", "http://b.com"]
        );
    }

    #[test]
    fn test_no_match_is_not_an_error() {
        let extraction = extract_urls("nothing to see here");
        assert!(extraction.urls.is_empty());
        assert_eq!(extraction.skipped, 0);
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        assert_eq!(raw_urls("HTTPS://Example.COM/x"), vec!["HTTPS://Example.COM/x"]);
    }

    #[test]
    fn test_match_stops_at_quotes_and_whitespace() {
        assert_eq!(
            raw_urls(r#"<a href="https://example.com/a?b=1">link</a>"#),
            vec!["https://example.com/a?b=1"]
        );
        assert_eq!(
            raw_urls("'ws://socket.example.com:8080/live' next"),
            vec!["ws://socket.example.com:8080/live"]
        );
    }

    #[test]
    fn test_userinfo_port_and_ipv6() {
        assert_eq!(
            raw_urls("ftp://user:pw@files.example.com:21/pub"),
            vec!["ftp://user:pw@files.example.com:21/pub"]
        );
        assert_eq!(raw_urls("http://[::1]:8080/admin"), vec!["http://[::1]:8080/admin"]);
    }

    #[test]
    fn test_unknown_scheme_is_ignored() {
        assert!(raw_urls("mailto://someone@example.com gopherx").is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        assert_eq!(
            raw_urls("http://a.com http://a.com"),
            vec!["http://a.com", "http://a.com"]
        );
    }

    #[test]
    fn test_malformed_match_is_skipped_and_siblings_survive() {
        let extraction = extract_urls("http://example.com:99999/x then http://ok.com/y");
        assert_eq!(extraction.skipped, 1);
        let urls: Vec<&str> = extraction.urls.iter().map(|u| u.as_str()).collect();
        assert_eq!(urls, vec!["http://ok.com/y"]);
    }

    #[test]
    fn test_query_detection() {
        let with_query = ExtractedUrl::parse("http://example.com/path?a=1").unwrap();
        assert!(with_query.has_query());

        let without = ExtractedUrl::parse("http://example.com/path").unwrap();
        assert!(!without.has_query());

        let bare = ExtractedUrl::parse("http://example.com/path?").unwrap();
        assert!(!bare.has_query());

        let fragment_only = ExtractedUrl::parse("http://example.com/path#a?b=1").unwrap();
        assert!(!fragment_only.has_query());
    }

    #[test]
    fn test_raw_text_is_preserved() {
        let url = ExtractedUrl::parse("HTTP://Example.com").unwrap();
        assert_eq!(url.as_str(), "HTTP://Example.com");
        assert_eq!(url.parsed().as_str(), "http://example.com/");
    }
}
