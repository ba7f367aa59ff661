//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use cytogate::prelude::*;
//! ```

pub use crate::diagnostics::{diagnose, ImbalanceReport, ImbalanceSeverity, MajorityLabel};
pub use crate::error::{CytogateError, Result};
pub use crate::frame::{EventFrame, EventId, GateTable};
pub use crate::hierarchy::GateHierarchy;
pub use crate::labels::{DerivedClass, HierarchicalLabelDeriver};
pub use crate::preprocess::{StageData, StagePreprocessor};
pub use crate::sampling::Downsampler;
