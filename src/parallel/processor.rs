use anyhow::{Result, anyhow};
use crossbeam::channel::{Receiver, Sender, bounded};
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::throttle::{Throttle, throttle_for};
use crate::config::GenerateConfig;
use crate::extract::extract_urls;
use crate::generate::write_candidates;
use crate::input::read_lines;

/// Channel buffer size multiplier (buffer = workers * multiplier)
const CHANNEL_BUFFER_MULTIPLIER: usize = 2;

/// Lifecycle of a single run. There is no way back to `Dispatching`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    Idle,
    Dispatching,
    Draining,
    Done,
}

impl fmt::Display for DispatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DispatchPhase::Idle => "idle",
            DispatchPhase::Dispatching => "dispatching",
            DispatchPhase::Draining => "draining",
            DispatchPhase::Done => "done",
        };
        f.write_str(name)
    }
}

fn transition(from: DispatchPhase, to: DispatchPhase) {
    tracing::debug!("Dispatcher {} -> {}", from, to);
}

/// Totals for a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// URL lines handed to workers
    pub lines: usize,
    /// URLs successfully extracted
    pub urls: usize,
    /// Candidate lines written
    pub candidates: usize,
    /// Matches dropped because they failed to parse
    pub skipped: usize,
}

#[derive(Default)]
struct Counters {
    lines: AtomicUsize,
    urls: AtomicUsize,
    candidates: AtomicUsize,
    skipped: AtomicUsize,
}

impl Counters {
    fn snapshot(&self) -> DispatchStats {
        DispatchStats {
            lines: self.lines.load(Ordering::Relaxed),
            urls: self.urls.load(Ordering::Relaxed),
            candidates: self.candidates.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }
}

/// State shared by every worker of one run
struct Shared<'a, W> {
    params: &'a [String],
    sink: Mutex<W>,
    counters: Counters,
    failed: AtomicBool,
    first_error: Mutex<Option<io::Error>>,
}

/// Fans URL lines out to a fixed pool of worker threads.
pub struct Dispatcher {
    workers: usize,
    throttle: Box<dyn Throttle>,
}

impl Dispatcher {
    /// Create a dispatcher with `workers` threads (at least one).
    pub fn new<T: Throttle + 'static>(workers: usize, throttle: T) -> Self {
        Self::with_boxed_throttle(workers, Box::new(throttle))
    }

    pub fn with_boxed_throttle(workers: usize, throttle: Box<dyn Throttle>) -> Self {
        Self {
            workers: workers.max(1),
            throttle,
        }
    }

    /// Dispatcher sized and throttled from the merged configuration.
    pub fn from_config(config: &GenerateConfig) -> Self {
        Self::with_boxed_throttle(config.concurrency, throttle_for(config.delay()))
    }

    /// Number of worker threads a run will start.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Load both input files and process every URL line.
    ///
    /// A read failure on either file aborts the run before any output.
    pub fn run<W: Write + Send>(
        self,
        urls_path: &Path,
        params_path: &Path,
        sink: W,
    ) -> Result<DispatchStats> {
        let urls = read_lines(urls_path, "URLs")?;
        let params = read_lines(params_path, "parameters")?;
        self.run_lines(&urls, &params, sink)
    }

    /// Process in-memory URL lines against `params`, writing candidates to `sink`.
    ///
    /// Consumes the dispatcher: a run passes through each [`DispatchPhase`] once.
    pub fn run_lines<W: Write + Send>(
        self,
        urls: &[String],
        params: &[String],
        sink: W,
    ) -> Result<DispatchStats> {
        let shared = Shared {
            params,
            sink: Mutex::new(sink),
            counters: Counters::default(),
            failed: AtomicBool::new(false),
            first_error: Mutex::new(None),
        };

        let (work_tx, work_rx): (Sender<&str>, Receiver<&str>) =
            bounded(self.workers * CHANNEL_BUFFER_MULTIPLIER);

        tracing::info!(
            "Generating candidates for {} lines x {} parameters with {} workers",
            urls.len(),
            params.len(),
            self.workers
        );

        transition(DispatchPhase::Idle, DispatchPhase::Dispatching);
        let this = &self;
        let shared_ref = &shared;

        crossbeam::thread::scope(|s| {
            for worker_id in 0..this.workers {
                let work_rx = work_rx.clone();
                s.spawn(move |_| this.worker(worker_id, work_rx, shared_ref));
            }
            // Workers hold the only receivers from here on
            drop(work_rx);

            for line in urls {
                if work_tx.send(line.as_str()).is_err() {
                    break; // Every worker has stopped
                }
            }
            // Close the queue so workers exit once it is drained
            drop(work_tx);
            transition(DispatchPhase::Dispatching, DispatchPhase::Draining);
        })
        .map_err(|_| anyhow!("Worker thread panicked during candidate generation"))?;

        let Shared {
            sink,
            counters,
            first_error,
            ..
        } = shared;

        if let Some(e) = first_error.into_inner().ok().flatten() {
            return Err(anyhow::Error::new(e).context("Error writing candidates"));
        }

        let mut sink = sink
            .into_inner()
            .map_err(|_| anyhow!("Output sink poisoned by a panicked worker"))?;
        sink.flush()
            .map_err(|e| anyhow::Error::new(e).context("Error writing candidates"))?;

        transition(DispatchPhase::Draining, DispatchPhase::Done);
        let stats = counters.snapshot();
        tracing::info!(
            "Processed {} lines: {} URLs, {} candidates, {} skipped",
            stats.lines,
            stats.urls,
            stats.candidates,
            stats.skipped
        );
        Ok(stats)
    }

    fn worker<W: Write + Send>(
        &self,
        worker_id: usize,
        work_rx: Receiver<&str>,
        shared: &Shared<'_, W>,
    ) {
        let mut buf = Vec::new();

        while let Ok(line) = work_rx.recv() {
            if shared.failed.load(Ordering::Relaxed) {
                break;
            }

            self.throttle.wait();

            if let Err(e) = self.process_line(line, &mut buf, shared) {
                tracing::error!("worker-{}: {}", worker_id, e);
                if !shared.failed.swap(true, Ordering::Relaxed) {
                    if let Ok(mut slot) = shared.first_error.lock() {
                        *slot = Some(e);
                    }
                }
                break;
            }
        }

        tracing::trace!("worker-{} finished", worker_id);
    }

    /// Generate every candidate for one line and write them in a single batch.
    fn process_line<W: Write>(
        &self,
        line: &str,
        buf: &mut Vec<u8>,
        shared: &Shared<'_, W>,
    ) -> io::Result<()> {
        buf.clear();

        let extraction = extract_urls(line);
        let mut written = 0;
        for url in &extraction.urls {
            written += write_candidates(buf, url, shared.params)?;
        }

        let counters = &shared.counters;
        counters.lines.fetch_add(1, Ordering::Relaxed);
        counters.urls.fetch_add(extraction.urls.len(), Ordering::Relaxed);
        counters.skipped.fetch_add(extraction.skipped, Ordering::Relaxed);

        if buf.is_empty() {
            return Ok(());
        }

        let mut sink = shared
            .sink
            .lock()
            .map_err(|_| io::Error::other("output sink poisoned"))?;
        sink.write_all(buf)?;
        counters.candidates.fetch_add(written, Ordering::Relaxed);
        Ok(())
    }
}
