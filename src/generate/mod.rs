//! Fuzz candidate generation
//!
//! Every extracted URL is combined with every parameter name, producing
//! `<url>?<param>=FUZZ` or, when the URL already has a query string,
//! `<url>&<param>=FUZZ`.

use crate::extract::ExtractedUrl;
use std::io::{self, Write};

/// Marker value downstream fuzzers replace with payloads.
pub const SENTINEL: &str = "FUZZ";

/// Separator for appending a parameter to `url`.
pub fn separator(url: &ExtractedUrl<'_>) -> char {
    if url.has_query() { '&' } else { '?' }
}

fn is_blank(param: &str) -> bool {
    param.trim().is_empty()
}

/// Build one candidate line (without trailing newline).
pub fn candidate_line(url: &ExtractedUrl<'_>, param: &str) -> String {
    format!("{}{}{}={}", url.as_str(), separator(url), param, SENTINEL)
}

/// Candidate lines for `url`, one per non-blank parameter, in parameter order.
pub fn candidates<'p>(
    url: &'p ExtractedUrl<'_>,
    params: &'p [String],
) -> impl Iterator<Item = String> + 'p {
    params
        .iter()
        .filter(|param| !is_blank(param))
        .map(move |param| candidate_line(url, param))
}

/// Write the candidate lines for `url` to `writer`, newline-terminated.
/// Returns the number of lines written.
pub fn write_candidates<W: Write + ?Sized>(
    writer: &mut W,
    url: &ExtractedUrl<'_>,
    params: &[String],
) -> io::Result<usize> {
    let mut written = 0;
    for line in candidates(url, params) {
        writeln!(writer, "{}", line)?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(list: &[&str]) -> Vec<String> {
        list.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_question_mark_without_query() {
        let url = ExtractedUrl::parse("http://example.com/path").unwrap();
        let lines: Vec<String> = candidates(&url, &params(&["foo", "bar"])).collect();
        assert_eq!(
            lines,
            vec![
                "http://example.com/path?foo=FUZZ",
                "http://example.com/path?bar=FUZZ"
            ]
        );
    }

    #[test]
    fn test_ampersand_with_existing_query() {
        let url = ExtractedUrl::parse("http://example.com/path?a=1").unwrap();
        let lines: Vec<String> = candidates(&url, &params(&["foo"])).collect();
        assert_eq!(lines, vec!["http://example.com/path?a=1&foo=FUZZ"]);
    }

    #[test]
    fn test_blank_parameters_produce_nothing() {
        let url = ExtractedUrl::parse("http://example.com").unwrap();
        let lines: Vec<String> = candidates(&url, &params(&["", "  ", "id"])).collect();
        assert_eq!(lines, vec!["http://example.com?id=FUZZ"]);
    }

    #[test]
    fn test_empty_query_uses_question_mark() {
        let url = ExtractedUrl::parse("http://example.com/?").unwrap();
        assert_eq!(separator(&url), '?');
        assert_eq!(candidate_line(&url, "q"), "http://example.com/??q=FUZZ");
    }

    #[test]
    fn test_write_candidates_counts_lines() {
        let url = ExtractedUrl::parse("https://example.com/s?q=x").unwrap();
        let mut out = Vec::new();
        let written = write_candidates(&mut out, &url, &params(&["a", "", "b"])).unwrap();

        assert_eq!(written, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "https://example.com/s?q=x&a=FUZZ\nhttps://example.com/s?q=x&b=FUZZ\n"
        );
    }
}
