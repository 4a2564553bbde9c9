//! Configuration management for paramfuzz
//!
//! Settings are layered with figment: embedded defaults, an optional config
//! file, `PARAMFUZZ_*` environment variables and finally explicit CLI flags.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub mod core;

pub use self::core::ConfigLoader;

/// Fully merged run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Worker thread count
    pub concurrency: usize,

    /// Per-line throttle delay in milliseconds
    pub delay_ms: u64,

    /// Report missing input paths as an error instead of a silent no-op
    #[serde(default)]
    pub strict: bool,

    /// File of URL-bearing lines
    #[serde(default)]
    pub urls: Option<PathBuf>,

    /// File of parameter names
    #[serde(default)]
    pub params: Option<PathBuf>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            concurrency: 30,
            delay_ms: 10,
            strict: false,
            urls: None,
            params: None,
        }
    }
}

impl GenerateConfig {
    /// Clamp values that would make the run meaningless.
    pub fn validate(mut self) -> Self {
        if self.concurrency == 0 {
            tracing::warn!("concurrency must be at least 1, using 1");
            self.concurrency = 1;
        }
        self
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Both input paths, if both are set and non-empty.
    pub fn input_paths(&self) -> Option<(&PathBuf, &PathBuf)> {
        match (non_empty(&self.urls), non_empty(&self.params)) {
            (Some(urls), Some(params)) => Some((urls, params)),
            _ => None,
        }
    }
}

fn non_empty(path: &Option<PathBuf>) -> Option<&PathBuf> {
    path.as_ref().filter(|p| !p.as_os_str().is_empty())
}

/// Values supplied on the command line. Unset fields leave lower layers intact.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<PathBuf>,
}
