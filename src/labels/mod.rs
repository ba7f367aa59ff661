//! Deriving one categorical class per event from the gate flags.
//!
//! The three boolean gate flags collapse into a four-way class by summing
//! them as 0/1: an event that passed no gate is a non-lymphocyte, one that
//! passed all three is a live single lymphocyte. The sum only carries this
//! meaning while the hierarchy is monotonic, so derivation checks every
//! event first and refuses to emit classes over inconsistent flags.

use serde::{Deserialize, Serialize};

use crate::error::{CytogateError, Result};
use crate::frame::GateTable;
use crate::hierarchy::GateHierarchy;

/// Combined classification of one event across all gate stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DerivedClass {
    /// Passed no gate (flag sum 0).
    NonLymphocytes,
    /// Passed only the lymphocyte gate (flag sum 1).
    NonSingleCells,
    /// Passed lymphocyte and singlet gates but not viability (flag sum 2).
    Dead,
    /// Passed all three gates (flag sum 3).
    Alive,
}

impl DerivedClass {
    /// Map a flag sum in `0..=3` to its class.
    ///
    /// # Panics
    ///
    /// Panics on a sum above 3; with three flags that cannot occur.
    #[must_use]
    pub fn from_flag_sum(sum: usize) -> Self {
        match sum {
            0 => Self::NonLymphocytes,
            1 => Self::NonSingleCells,
            2 => Self::Dead,
            3 => Self::Alive,
            _ => unreachable!("flag sum {sum} out of range for a three-stage hierarchy"),
        }
    }

    /// The class label as used in annotation exports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonLymphocytes => "Non-Lymphocytes",
            Self::NonSingleCells => "Non-Single Cells",
            Self::Dead => "Dead",
            Self::Alive => "Alive",
        }
    }
}

impl std::fmt::Display for DerivedClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives the combined [`DerivedClass`] column from a [`GateTable`].
///
/// # Examples
///
/// ```
/// use cytogate::frame::GateTable;
/// use cytogate::labels::{DerivedClass, HierarchicalLabelDeriver};
///
/// let gates = GateTable::new(
///     vec![0, 1],
///     vec![
///         ("Lymphocytes".to_string(), vec![true, false]),
///         ("Single Cells".to_string(), vec![true, false]),
///         ("Live".to_string(), vec![true, false]),
///     ],
/// )
/// .expect("valid gate table");
///
/// let deriver = HierarchicalLabelDeriver::default();
/// let classes = deriver.derive_classes(&gates).expect("monotonic flags");
/// assert_eq!(classes, vec![DerivedClass::Alive, DerivedClass::NonLymphocytes]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HierarchicalLabelDeriver {
    hierarchy: GateHierarchy,
}

impl HierarchicalLabelDeriver {
    /// Create a deriver over the given hierarchy.
    #[must_use]
    pub fn new(hierarchy: GateHierarchy) -> Self {
        Self { hierarchy }
    }

    /// Derive one class per event, in the table's index order.
    ///
    /// Every event's flag tuple is validated against the hierarchy before
    /// any class is emitted. Derivation is all-or-nothing: a single
    /// non-monotonic event aborts the whole call, so callers never receive
    /// a class column with biologically meaningless entries mixed in.
    ///
    /// # Errors
    ///
    /// Returns [`CytogateError::MissingColumn`] if any stage column is
    /// absent, or [`CytogateError::HierarchyViolation`] listing every
    /// offending event id if the flags are non-monotonic.
    pub fn derive_classes(&self, gates: &GateTable) -> Result<Vec<DerivedClass>> {
        let columns: Vec<&[bool]> = self
            .hierarchy
            .stages()
            .into_iter()
            .map(|stage| gates.column(stage))
            .collect::<Result<_>>()?;

        let mut violations = Vec::new();
        let mut flags = vec![false; columns.len()];
        for (row, &id) in gates.index().iter().enumerate() {
            for (k, col) in columns.iter().enumerate() {
                flags[k] = col[row];
            }
            if self.hierarchy.validate(&flags).is_err() {
                violations.push(id);
            }
        }
        if !violations.is_empty() {
            return Err(CytogateError::HierarchyViolation { events: violations });
        }

        let classes = (0..gates.n_rows())
            .map(|row| {
                let sum = columns.iter().filter(|col| col[row]).count();
                DerivedClass::from_flag_sum(sum)
            })
            .collect();
        Ok(classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gates(rows: Vec<(u64, [bool; 3])>) -> GateTable {
        let index: Vec<u64> = rows.iter().map(|(id, _)| *id).collect();
        let column = |k: usize| rows.iter().map(|(_, f)| f[k]).collect::<Vec<bool>>();
        GateTable::new(
            index,
            vec![
                ("Lymphocytes".to_string(), column(0)),
                ("Single Cells".to_string(), column(1)),
                ("Live".to_string(), column(2)),
            ],
        )
        .expect("valid gate table")
    }

    #[test]
    fn test_all_four_classes() {
        let gates = gates(vec![
            (0, [false, false, false]),
            (1, [true, false, false]),
            (2, [true, true, false]),
            (3, [true, true, true]),
        ]);
        let classes = HierarchicalLabelDeriver::default()
            .derive_classes(&gates)
            .expect("monotonic flags");
        assert_eq!(
            classes,
            vec![
                DerivedClass::NonLymphocytes,
                DerivedClass::NonSingleCells,
                DerivedClass::Dead,
                DerivedClass::Alive,
            ]
        );
    }

    #[test]
    fn test_class_labels() {
        assert_eq!(DerivedClass::NonLymphocytes.as_str(), "Non-Lymphocytes");
        assert_eq!(DerivedClass::NonSingleCells.as_str(), "Non-Single Cells");
        assert_eq!(DerivedClass::Dead.as_str(), "Dead");
        assert_eq!(DerivedClass::Alive.to_string(), "Alive");
    }

    #[test]
    fn test_from_flag_sum_total_mapping() {
        assert_eq!(DerivedClass::from_flag_sum(0), DerivedClass::NonLymphocytes);
        assert_eq!(DerivedClass::from_flag_sum(1), DerivedClass::NonSingleCells);
        assert_eq!(DerivedClass::from_flag_sum(2), DerivedClass::Dead);
        assert_eq!(DerivedClass::from_flag_sum(3), DerivedClass::Alive);
    }

    #[test]
    fn test_derivation_follows_index_order() {
        let gates = gates(vec![
            (9, [true, true, true]),
            (3, [false, false, false]),
            (7, [true, false, false]),
        ]);
        let classes = HierarchicalLabelDeriver::default()
            .derive_classes(&gates)
            .expect("monotonic flags");
        assert_eq!(
            classes,
            vec![
                DerivedClass::Alive,
                DerivedClass::NonLymphocytes,
                DerivedClass::NonSingleCells,
            ]
        );
    }

    #[test]
    fn test_non_monotonic_flags_abort_with_offenders() {
        let gates = gates(vec![
            (0, [true, true, true]),
            (1, [false, true, false]),
            (2, [true, false, true]),
        ]);
        let err = HierarchicalLabelDeriver::default()
            .derive_classes(&gates)
            .unwrap_err();
        match err {
            CytogateError::HierarchyViolation { events } => {
                assert_eq!(events, vec![1, 2]);
            }
            other => panic!("expected HierarchyViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_stage_column() {
        let gates = GateTable::new(
            vec![0],
            vec![
                ("Lymphocytes".to_string(), vec![true]),
                ("Single Cells".to_string(), vec![true]),
            ],
        )
        .expect("valid gate table");
        assert!(matches!(
            HierarchicalLabelDeriver::default().derive_classes(&gates),
            Err(CytogateError::MissingColumn { .. })
        ));
    }
}
