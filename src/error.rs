//! Error types for cytogate operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for cytogate operations.
///
/// Covers loader failures, structurally invalid annotation tables,
/// out-of-range sampling requests, and gating-hierarchy violations.
///
/// # Examples
///
/// ```
/// use cytogate::error::CytogateError;
///
/// let err = CytogateError::MissingColumn {
///     column: "Lymphocytes".to_string(),
/// };
/// assert!(err.to_string().contains("Lymphocytes"));
/// ```
#[derive(Debug)]
pub enum CytogateError {
    /// A feature or annotation source could not be read or parsed.
    Load {
        /// Path of the file that failed to load
        path: String,
        /// Underlying cause
        message: String,
    },

    /// A required gate-stage column is absent from the annotation table.
    MissingColumn {
        /// Name of the missing column
        column: String,
    },

    /// Requested downsample size exceeds the available population.
    Sampling {
        /// Number of events requested
        requested: usize,
        /// Size of the population sampled from
        population: usize,
    },

    /// One or more events carry non-monotonic gate flags.
    HierarchyViolation {
        /// Event identifiers whose flags violate the gating hierarchy
        events: Vec<u64>,
    },

    /// A stage name is not part of the configured gating hierarchy.
    UnknownStage {
        /// The unrecognized stage name
        stage: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for CytogateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CytogateError::Load { path, message } => {
                write!(f, "Failed to load {path}: {message}")
            }
            CytogateError::MissingColumn { column } => {
                write!(f, "Column '{column}' not found in annotation table")
            }
            CytogateError::Sampling {
                requested,
                population,
            } => {
                write!(
                    f,
                    "Cannot sample {requested} events from a population of {population}"
                )
            }
            CytogateError::HierarchyViolation { events } => {
                let shown: Vec<String> = events.iter().take(5).map(u64::to_string).collect();
                let suffix = if events.len() > 5 { ", ..." } else { "" };
                write!(
                    f,
                    "Gating hierarchy violated by {} event(s): [{}{suffix}]",
                    events.len(),
                    shown.join(", ")
                )
            }
            CytogateError::UnknownStage { stage } => {
                write!(f, "Stage '{stage}' is not part of the gating hierarchy")
            }
            CytogateError::Io(e) => write!(f, "I/O error: {e}"),
            CytogateError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CytogateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CytogateError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CytogateError {
    fn from(err: std::io::Error) -> Self {
        CytogateError::Io(err)
    }
}

impl From<&str> for CytogateError {
    fn from(msg: &str) -> Self {
        CytogateError::Other(msg.to_string())
    }
}

impl From<String> for CytogateError {
    fn from(msg: String) -> Self {
        CytogateError::Other(msg)
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, CytogateError>;
