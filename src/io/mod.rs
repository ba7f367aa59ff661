//! Loader collaborators for feature and annotation tables.
//!
//! The core never parses instrument files itself: it consumes whatever a
//! [`FeatureSource`] or [`AnnotationSource`] hands it. The CSV-backed
//! implementations here cover exported event tables; a binary FCS reader
//! can plug in behind the same traits without touching the core.
//!
//! Event ids are assigned as row ordinals at load time and stay attached
//! to their rows through every later filter or reorder.

use std::path::Path;

use crate::error::{CytogateError, Result};
use crate::frame::{EventFrame, EventId, GateTable};

/// Supplies the per-event measurement table.
pub trait FeatureSource {
    /// Load the feature matrix at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CytogateError::Load`] naming the path and the underlying
    /// cause when the file cannot be read or parsed.
    fn load_features(&self, path: &Path) -> Result<EventFrame>;
}

/// Supplies the per-event gate annotation table.
pub trait AnnotationSource {
    /// Load the gate annotations at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CytogateError::Load`] naming the path and the underlying
    /// cause when the file cannot be read or parsed.
    fn load_annotations(&self, path: &Path) -> Result<GateTable>;
}

/// Reads a delimited text export of channel measurements.
///
/// Expects a header row of channel names and one row of floats per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFeatureSource;

impl FeatureSource for CsvFeatureSource {
    fn load_features(&self, path: &Path) -> Result<EventFrame> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| load_error(path, &e))?;
        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| load_error(path, &e))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut columns: Vec<Vec<f32>> = vec![Vec::new(); headers.len()];
        let mut index: Vec<EventId> = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| load_error(path, &e))?;
            if record.len() != headers.len() {
                return Err(CytogateError::Load {
                    path: path.display().to_string(),
                    message: format!(
                        "row {} has {} fields, expected {}",
                        row + 2,
                        record.len(),
                        headers.len()
                    ),
                });
            }
            for (col, field) in record.iter().enumerate() {
                let value: f32 = field.trim().parse().map_err(|_| CytogateError::Load {
                    path: path.display().to_string(),
                    message: format!(
                        "row {}, column '{}': '{field}' is not a number",
                        row + 2,
                        headers[col]
                    ),
                })?;
                columns[col].push(value);
            }
            index.push(row as EventId);
        }

        EventFrame::new(
            index,
            headers.into_iter().zip(columns).collect(),
        )
    }
}

/// Reads a delimited text export of boolean gate annotations.
///
/// Accepts `true`/`false`, `True`/`False`, and `1`/`0` cell values.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvAnnotationSource;

impl AnnotationSource for CsvAnnotationSource {
    fn load_annotations(&self, path: &Path) -> Result<GateTable> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| load_error(path, &e))?;
        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| load_error(path, &e))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut columns: Vec<Vec<bool>> = vec![Vec::new(); headers.len()];
        let mut index: Vec<EventId> = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| load_error(path, &e))?;
            if record.len() != headers.len() {
                return Err(CytogateError::Load {
                    path: path.display().to_string(),
                    message: format!(
                        "row {} has {} fields, expected {}",
                        row + 2,
                        record.len(),
                        headers.len()
                    ),
                });
            }
            for (col, field) in record.iter().enumerate() {
                let flag = parse_bool(field).ok_or_else(|| CytogateError::Load {
                    path: path.display().to_string(),
                    message: format!(
                        "row {}, column '{}': '{field}' is not a boolean",
                        row + 2,
                        headers[col]
                    ),
                })?;
                columns[col].push(flag);
            }
            index.push(row as EventId);
        }

        GateTable::new(
            index,
            headers.into_iter().zip(columns).collect(),
        )
    }
}

fn parse_bool(field: &str) -> Option<bool> {
    match field.trim() {
        "true" | "True" | "TRUE" | "1" => Some(true),
        "false" | "False" | "FALSE" | "0" => Some(false),
        _ => None,
    }
}

fn load_error(path: &Path, cause: &dyn std::fmt::Display) -> CytogateError {
    CytogateError::Load {
        path: path.display().to_string(),
        message: cause.to_string(),
    }
}
