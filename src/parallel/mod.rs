//! Bounded worker pool for candidate generation
//!
//! The dispatcher owns a fixed number of worker threads that share a single
//! crossbeam channel of URL lines. The main thread feeds every line into the
//! channel once, closes it, and then blocks on the thread scope until all
//! workers have drained the queue.
//!
//! ```text
//! ┌──────────────┐   bounded    ┌──────────────┐    Mutex<W>    ┌──────────┐
//! │  Dispatcher  │──channel────▶│  N workers   │───────────────▶│  stdout  │
//! │  (producer)  │  URL lines   │ extract+gen  │  one write per │          │
//! └──────────────┘              └──────────────┘   input line   └──────────┘
//! ```
//!
//! Output order across input lines is whatever the scheduler produces, but all
//! candidates generated from one input line are written contiguously.
//!
//! # Example
//!
//! ```rust
//! use paramfuzz::parallel::{Dispatcher, NoDelay};
//!
//! let urls = vec!["see http://a.com and http://b.com/?q=1".to_string()];
//! let params = vec!["id".to_string()];
//! let mut out = Vec::new();
//!
//! let stats = Dispatcher::new(4, NoDelay).run_lines(&urls, &params, &mut out)?;
//! assert_eq!(stats.candidates, 2);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod processor;
pub mod throttle;

pub use processor::{DispatchPhase, DispatchStats, Dispatcher};
pub use throttle::{FixedDelay, NoDelay, Throttle, throttle_for};
