//! Cytogate: flow-cytometry training-data preparation.
//!
//! Cytogate turns raw per-event measurement tables and per-event boolean
//! gate annotations into labeled training subsets for a hierarchy of
//! classification stages (Lymphocytes → Single Cells → Live), and
//! diagnoses class-label imbalance before training.
//!
//! # Quick Start
//!
//! ```
//! use cytogate::prelude::*;
//!
//! // Gate annotations for four events, monotonic across the hierarchy.
//! let gates = GateTable::new(
//!     vec![0, 1, 2, 3],
//!     vec![
//!         ("Lymphocytes".to_string(), vec![true, true, true, false]),
//!         ("Single Cells".to_string(), vec![true, true, false, false]),
//!         ("Live".to_string(), vec![true, false, false, false]),
//!     ],
//! ).expect("valid gate table");
//!
//! // One combined class per event.
//! let classes = HierarchicalLabelDeriver::default()
//!     .derive_classes(&gates)
//!     .expect("monotonic flags");
//! assert_eq!(classes[0], DerivedClass::Alive);
//! assert_eq!(classes[3], DerivedClass::NonLymphocytes);
//!
//! // Imbalance of one stage's label column.
//! let report = diagnose(gates.column("Live").expect("column exists"));
//! assert_ne!(report, ImbalanceReport::EmptyLabelSet);
//! ```
//!
//! # Modules
//!
//! - [`frame`]: EventFrame and GateTable, id-indexed tabular containers
//! - [`sampling`]: Downsampler for random subsets without replacement
//! - [`hierarchy`]: GateHierarchy ordering and monotonicity validation
//! - [`labels`]: Combined class derivation from gate flags
//! - [`diagnostics`]: Class-label imbalance classification
//! - [`preprocess`]: Stage-aware feature/label subset extraction
//! - [`io`]: Loader collaborators (CSV sources, pluggable traits)
//! - [`discovery`]: Control event file discovery

pub mod diagnostics;
pub mod discovery;
pub mod error;
pub mod frame;
pub mod hierarchy;
pub mod io;
pub mod labels;
pub mod prelude;
pub mod preprocess;
pub mod sampling;

pub use error::{CytogateError, Result};
pub use frame::{EventFrame, EventId, GateTable};
pub use hierarchy::GateHierarchy;
pub use preprocess::{StageData, StagePreprocessor};
