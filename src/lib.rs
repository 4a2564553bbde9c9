//! # paramfuzz - fuzz candidate URL generator
//!
//! paramfuzz turns a list of URLs and a list of parameter names into input for
//! an HTTP fuzzer. Every URL found in the URL list is printed once per
//! parameter with that parameter appended and the `FUZZ` marker as its value:
//!
//! ```text
//! http://example.com/path      + foo  ->  http://example.com/path?foo=FUZZ
//! http://example.com/path?a=1  + foo  ->  http://example.com/path?a=1&foo=FUZZ
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! paramfuzz -u urls.txt -p params.txt -c 50 > candidates.txt
//! ffuf -w candidates.txt:URL -u URL
//! ```
//!
//! URL lines may contain arbitrary surrounding text (logs, HTML, crawler
//! output); every URL on a line is extracted and expanded.
//!
//! ## Library Usage
//!
//! ```rust
//! use paramfuzz::extract::extract_urls;
//! use paramfuzz::generate::candidates;
//!
//! let params = vec!["id".to_string()];
//! let extraction = extract_urls("GET https://shop.example.com/item?sku=1 200");
//! let lines: Vec<String> = extraction
//!     .urls
//!     .iter()
//!     .flat_map(|url| candidates(url, &params))
//!     .collect();
//! assert_eq!(lines, vec!["https://shop.example.com/item?sku=1&id=FUZZ"]);
//! ```

pub mod cli;
pub mod config;
pub mod extract;
pub mod generate;
pub mod input;
pub mod parallel;

pub use cli::{Cli, Output};
pub use config::GenerateConfig;
pub use generate::SENTINEL;

/// Result type alias for paramfuzz operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
