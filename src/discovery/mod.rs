//! Discovery of control event files under an acquisition directory.
//!
//! Instrument runs land in nested per-sample folders; the control files
//! used for compensation are named after the sample pattern and carry a
//! marker substring ("STD" by default). Discovery walks the tree and
//! returns every event file matching a pattern and the marker.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::Result;

/// Default marker substring identifying control files.
pub const CONTROL_MARKER: &str = "STD";

/// Default event-file extension.
pub const EVENT_FILE_EXTENSION: &str = "fcs";

/// What to look for when discovering control files.
///
/// Patterns are an explicit parameter of every query; there is no
/// process-wide pattern list.
#[derive(Debug, Clone)]
pub struct ControlFileQuery {
    patterns: Vec<Regex>,
    marker: String,
    extension: String,
}

impl ControlFileQuery {
    /// Build a query from sample name patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern is not a valid regular expression.
    pub fn new(patterns: &[&str]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|&p| Regex::new(p).map_err(|e| format!("Invalid pattern '{p}': {e}").into()))
            .collect::<Result<_>>()?;
        Ok(Self {
            patterns,
            marker: CONTROL_MARKER.to_string(),
            extension: EVENT_FILE_EXTENSION.to_string(),
        })
    }

    /// Override the control marker substring.
    #[must_use]
    pub fn with_marker(mut self, marker: &str) -> Self {
        self.marker = marker.to_string();
        self
    }

    /// Override the recognized event-file extension.
    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.to_string();
        self
    }

    fn matches(&self, file_name: &str) -> bool {
        file_name.contains(&self.marker) && self.patterns.iter().any(|p| p.is_match(file_name))
    }
}

/// Find all control event files under `root` matching the query.
///
/// Walks the directory tree recursively; a file is returned when its name
/// matches any query pattern, contains the control marker, and has the
/// event-file extension. Results are sorted for deterministic output.
///
/// # Errors
///
/// Returns an I/O error if `root` or any subdirectory cannot be read.
pub fn find_control_files(root: &Path, query: &ControlFileQuery) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk(root, query, &mut found)?;
    found.sort();
    Ok(found)
}

fn walk(dir: &Path, query: &ControlFileQuery, found: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, query, found)?;
            continue;
        }
        let has_extension = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(query.extension.as_str()));
        if !has_extension {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if query.matches(name) {
                found.push(path);
            }
        }
    }
    Ok(())
}
