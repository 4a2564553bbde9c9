//! Line-oriented input loading
//!
//! Both the URL list and the parameter list are plain text files with one
//! entry per line. Lines are trimmed and blank lines dropped; bytes that are
//! not valid UTF-8 are decoded lossily so any newline-delimited encoding works.

use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read every non-blank line of `path`, trimmed, in file order.
///
/// `role` names the file in error messages ("URLs", "parameters").
/// A missing or unreadable file, or one that yields no bytes at all, is an
/// error. Pipes and `/dev/stdin` are read like regular files.
pub fn read_lines(path: &Path, role: &str) -> Result<Vec<String>> {
    let file = File::open(path)
        .with_context(|| format!("Error reading {} file: {}", role, path.display()))?;

    let (lines, bytes) = scan_lines(BufReader::new(file))
        .with_context(|| format!("Error reading {} file: {}", role, path.display()))?;
    if bytes == 0 {
        bail!("Error reading {} file: {} is empty", role, path.display());
    }

    tracing::debug!("Loaded {} {} from {}", lines.len(), role, path.display());
    Ok(lines)
}

/// Same as [`read_lines`] for any buffered reader. Empty input yields no lines.
pub fn read_lines_from<R: BufRead>(reader: R) -> Result<Vec<String>> {
    Ok(scan_lines(reader)?.0)
}

/// Trimmed non-blank lines plus the total number of bytes consumed.
fn scan_lines<R: BufRead>(mut reader: R) -> Result<(Vec<String>, usize)> {
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    let mut total = 0;

    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf)?;
        if read == 0 {
            break;
        }
        total += read;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }

    Ok((lines, total))
}
