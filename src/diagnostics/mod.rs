//! Class-label imbalance diagnostics.
//!
//! Before training, each boolean label column is checked for skew between
//! its majority and minority class. The severity buckets decide whether
//! rebalancing is worth the effort for that stage.
//!
//! # Example
//!
//! ```
//! use cytogate::diagnostics::{diagnose, ImbalanceReport, ImbalanceSeverity};
//!
//! let labels = [true, true, true, false, false];
//! match diagnose(&labels) {
//!     ImbalanceReport::Classified { severity, .. } => {
//!         assert_eq!(severity, ImbalanceSeverity::Mild);
//!     }
//!     ImbalanceReport::EmptyLabelSet => unreachable!(),
//! }
//! ```

use serde::{Deserialize, Serialize};

/// How skewed a two-valued label distribution is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImbalanceSeverity {
    /// Exactly 50/50.
    Balanced,
    /// Minority share in `[40, 50)` percent.
    Mild,
    /// Minority share in `[20, 40)` percent.
    Moderate,
    /// Minority share below 20 percent.
    Extreme,
}

/// Which label holds the majority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MajorityLabel {
    /// `true` is the majority (ties count as true).
    True,
    /// `false` is the majority.
    False,
}

impl std::fmt::Display for MajorityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::True => f.write_str("True"),
            Self::False => f.write_str("False"),
        }
    }
}

/// Outcome of an imbalance check over one label column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImbalanceReport {
    /// The label column had no observations. A terminal, reportable
    /// condition rather than an error.
    EmptyLabelSet,
    /// A classified distribution.
    Classified {
        /// The label carried by the larger class.
        majority_label: MajorityLabel,
        /// Percentage of the larger class, in `[50, 100]`.
        majority_pct: f64,
        /// Percentage of the smaller class, `100 - majority_pct`.
        minority_pct: f64,
        /// Severity bucket for `minority_pct`.
        severity: ImbalanceSeverity,
    },
}

impl ImbalanceReport {
    /// Human-readable guidance line for this report.
    #[must_use]
    pub fn advice(&self) -> String {
        match self {
            Self::EmptyLabelSet => "Class label is empty".to_string(),
            Self::Classified {
                majority_label,
                severity,
                ..
            } => match severity {
                ImbalanceSeverity::Balanced => "Dataset is balanced.".to_string(),
                ImbalanceSeverity::Mild => format!(
                    "Mild Imbalance, Majority class is '{majority_label}'. \
                     No need for Balancing Class labels."
                ),
                ImbalanceSeverity::Moderate => format!(
                    "Moderate Imbalance, Majority class is '{majority_label}'. \
                     Consider Balancing Class labels."
                ),
                ImbalanceSeverity::Extreme => format!(
                    "Extreme Imbalance, Majority class is '{majority_label}'. \
                     Balance Class labels."
                ),
            },
        }
    }
}

/// Classify the imbalance of a boolean label column.
///
/// An empty column yields [`ImbalanceReport::EmptyLabelSet`]; otherwise
/// the majority/minority percentages are computed and bucketed. Ties go
/// to `true`, and a 50/50 split is exactly [`ImbalanceSeverity::Balanced`].
#[must_use]
pub fn diagnose(labels: &[bool]) -> ImbalanceReport {
    let total = labels.len();
    if total == 0 {
        return ImbalanceReport::EmptyLabelSet;
    }
    let true_count = labels.iter().filter(|&&flag| flag).count();
    let true_pct = 100.0 * true_count as f64 / total as f64;

    let majority_label = if true_pct >= 50.0 {
        MajorityLabel::True
    } else {
        MajorityLabel::False
    };
    let majority_pct = true_pct.max(100.0 - true_pct);
    let minority_pct = 100.0 - majority_pct;

    let severity = if majority_pct == 50.0 {
        ImbalanceSeverity::Balanced
    } else if minority_pct >= 40.0 {
        ImbalanceSeverity::Mild
    } else if minority_pct >= 20.0 {
        ImbalanceSeverity::Moderate
    } else {
        ImbalanceSeverity::Extreme
    };

    ImbalanceReport::Classified {
        majority_label,
        majority_pct,
        minority_pct,
        severity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(true_count: usize, false_count: usize) -> Vec<bool> {
        let mut v = vec![true; true_count];
        v.extend(std::iter::repeat(false).take(false_count));
        v
    }

    fn classified(labels: &[bool]) -> (MajorityLabel, f64, f64, ImbalanceSeverity) {
        match diagnose(labels) {
            ImbalanceReport::Classified {
                majority_label,
                majority_pct,
                minority_pct,
                severity,
            } => (majority_label, majority_pct, minority_pct, severity),
            ImbalanceReport::EmptyLabelSet => panic!("expected a classified report"),
        }
    }

    #[test]
    fn test_all_true_is_extreme() {
        let (majority, majority_pct, minority_pct, severity) = classified(&labels(5, 0));
        assert_eq!(majority, MajorityLabel::True);
        assert_eq!(majority_pct, 100.0);
        assert_eq!(minority_pct, 0.0);
        assert_eq!(severity, ImbalanceSeverity::Extreme);
    }

    #[test]
    fn test_three_two_split_is_mild() {
        let (majority, majority_pct, minority_pct, severity) = classified(&labels(3, 2));
        assert_eq!(majority, MajorityLabel::True);
        assert_eq!(majority_pct, 60.0);
        assert_eq!(minority_pct, 40.0);
        assert_eq!(severity, ImbalanceSeverity::Mild);
    }

    #[test]
    fn test_three_seven_split_is_moderate() {
        let (majority, majority_pct, minority_pct, severity) = classified(&labels(3, 7));
        assert_eq!(majority, MajorityLabel::False);
        assert_eq!(majority_pct, 70.0);
        assert_eq!(minority_pct, 30.0);
        assert_eq!(severity, ImbalanceSeverity::Moderate);
    }

    #[test]
    fn test_even_split_is_balanced() {
        let (majority, majority_pct, _, severity) = classified(&labels(50, 50));
        // Ties go to true.
        assert_eq!(majority, MajorityLabel::True);
        assert_eq!(majority_pct, 50.0);
        assert_eq!(severity, ImbalanceSeverity::Balanced);
    }

    #[test]
    fn test_empty_is_terminal_report() {
        assert_eq!(diagnose(&[]), ImbalanceReport::EmptyLabelSet);
    }

    #[test]
    fn test_boundary_twenty_percent_is_moderate() {
        // 1 true / 4 false: minority exactly 20.
        let (_, _, minority_pct, severity) = classified(&labels(1, 4));
        assert_eq!(minority_pct, 20.0);
        assert_eq!(severity, ImbalanceSeverity::Moderate);
    }

    #[test]
    fn test_below_twenty_percent_is_extreme() {
        // 1 true / 9 false: minority 10.
        let (_, _, minority_pct, severity) = classified(&labels(1, 9));
        assert_eq!(minority_pct, 10.0);
        assert_eq!(severity, ImbalanceSeverity::Extreme);
    }

    #[test]
    fn test_advice_strings() {
        assert_eq!(diagnose(&[]).advice(), "Class label is empty");
        assert_eq!(diagnose(&labels(1, 1)).advice(), "Dataset is balanced.");
        assert!(diagnose(&labels(3, 2)).advice().starts_with("Mild Imbalance"));
        assert!(diagnose(&labels(3, 7))
            .advice()
            .contains("Consider Balancing"));
        let extreme = diagnose(&labels(9, 1)).advice();
        assert!(extreme.starts_with("Extreme Imbalance"));
        assert!(extreme.contains("'True'"));
    }
}
