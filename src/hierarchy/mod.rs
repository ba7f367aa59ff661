//! The ordered gating hierarchy and its monotonicity rules.
//!
//! Gates are applied in sequence: an event can only pass "Single Cells"
//! if it already passed "Lymphocytes", and only pass "Live" if it passed
//! "Single Cells". [`GateHierarchy`] encodes that order, checks per-event
//! flag tuples against it, and derives each stage's candidate population
//! from the previous stage's positives.

use crate::error::{CytogateError, Result};
use crate::frame::{EventId, GateTable};

/// Default stage order used by the lymphocyte gating panel.
pub const DEFAULT_STAGES: [&str; 3] = ["Lymphocytes", "Single Cells", "Live"];

/// An ordered sequence of gate stages.
///
/// Stage *k*'s positive population is by definition a subset of stage
/// *k-1*'s. A flag tuple breaking that ordering is a data-quality error,
/// never silently accepted.
///
/// # Examples
///
/// ```
/// use cytogate::hierarchy::GateHierarchy;
///
/// let hierarchy = GateHierarchy::default();
/// assert_eq!(hierarchy.stages(), ["Lymphocytes", "Single Cells", "Live"]);
/// assert!(hierarchy.validate(&[true, true, false]).is_ok());
/// assert_eq!(hierarchy.validate(&[false, true, false]), Err(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateHierarchy {
    stages: Vec<String>,
}

impl Default for GateHierarchy {
    fn default() -> Self {
        Self::new(&DEFAULT_STAGES)
    }
}

impl GateHierarchy {
    /// Create a hierarchy from stage names in dependency order.
    #[must_use]
    pub fn new(stages: &[&str]) -> Self {
        Self {
            stages: stages.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Returns the stage names in order.
    #[must_use]
    pub fn stages(&self) -> Vec<&str> {
        self.stages.iter().map(String::as_str).collect()
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the hierarchy has no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Returns the position of a stage in the hierarchy.
    ///
    /// # Errors
    ///
    /// Returns [`CytogateError::UnknownStage`] if the name is not a stage.
    pub fn position(&self, stage: &str) -> Result<usize> {
        self.stages
            .iter()
            .position(|s| s == stage)
            .ok_or_else(|| CytogateError::UnknownStage {
                stage: stage.to_string(),
            })
    }

    /// Check one event's flag tuple for monotonicity.
    ///
    /// Returns `Err(i)` at the first stage index `i` where the flag is true
    /// while the preceding stage's flag is false.
    pub fn validate(&self, flags: &[bool]) -> std::result::Result<(), usize> {
        for i in 1..flags.len() {
            if flags[i] && !flags[i - 1] {
                return Err(i);
            }
        }
        Ok(())
    }

    /// Candidate population for a stage.
    ///
    /// For the first stage this is the full annotation index; for every
    /// later stage it is exactly the ids whose flag in the immediately
    /// preceding stage is true, in index order.
    ///
    /// # Errors
    ///
    /// Returns [`CytogateError::UnknownStage`] for a name outside the
    /// hierarchy, or [`CytogateError::MissingColumn`] if the preceding
    /// stage's column is absent from `gates`.
    pub fn stage_pool(&self, stage: &str, gates: &GateTable) -> Result<Vec<EventId>> {
        let position = self.position(stage)?;
        if position == 0 {
            return Ok(gates.index().to_vec());
        }
        gates.events_where(&self.stages[position - 1])
    }
}
