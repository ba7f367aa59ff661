//! Stage-aware extraction of training subsets.
//!
//! [`StagePreprocessor`] owns the lazily loaded feature/annotation pair
//! for one preprocessing session and cuts per-stage `(features, labels)`
//! subsets out of it. The first stage is downsampled to a requested size;
//! every later stage draws its candidates from the previous stage's
//! positive population via [`GateHierarchy::stage_pool`]. All cross-table
//! addressing is by event id, so subsets stay aligned no matter how the
//! underlying tables were filtered or reordered.
//!
//! # Example
//!
//! ```no_run
//! use cytogate::preprocess::StagePreprocessor;
//!
//! let mut preprocessor = StagePreprocessor::from_csv("events.csv", "gates.csv")
//!     .with_random_state(42);
//! let lymphocytes = preprocessor.initial_subset(10_000)?;
//! let singlets = preprocessor.stage_subset("Single Cells")?;
//! println!("{:?} {:?}", lymphocytes.features.shape(), singlets.features.shape());
//! # Ok::<(), cytogate::error::CytogateError>(())
//! ```

use std::path::{Path, PathBuf};

use crate::error::{CytogateError, Result};
use crate::frame::{EventFrame, EventId, GateTable};
use crate::hierarchy::GateHierarchy;
use crate::io::{AnnotationSource, CsvAnnotationSource, CsvFeatureSource, FeatureSource};
use crate::sampling::Downsampler;

/// One stage's training subset: features and labels, index-aligned.
#[derive(Debug, Clone)]
pub struct StageData {
    /// Event ids of the subset, in subset order.
    pub events: Vec<EventId>,
    /// Channel measurements for exactly those events, in the same order.
    pub features: EventFrame,
    /// The stage's gate flag for exactly those events, in the same order.
    pub labels: Vec<bool>,
}

impl StageData {
    /// Returns the feature shape as (`n_rows`, `n_cols`).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.features.shape()
    }
}

/// Extracts per-stage feature/label subsets from one loaded session.
///
/// Feature and annotation tables are loaded lazily on first use and cached
/// for the lifetime of the preprocessor; repeated loads are no-ops.
#[derive(Debug)]
pub struct StagePreprocessor<F = CsvFeatureSource, A = CsvAnnotationSource>
where
    F: FeatureSource,
    A: AnnotationSource,
{
    feature_path: PathBuf,
    annotation_path: PathBuf,
    feature_source: F,
    annotation_source: A,
    hierarchy: GateHierarchy,
    downsampler: Downsampler,
    features: Option<EventFrame>,
    gates: Option<GateTable>,
}

impl StagePreprocessor<CsvFeatureSource, CsvAnnotationSource> {
    /// Create a preprocessor over CSV exports of features and annotations.
    pub fn from_csv<P: AsRef<Path>, Q: AsRef<Path>>(
        feature_path: P,
        annotation_path: Q,
    ) -> Self {
        Self::with_sources(
            feature_path,
            annotation_path,
            CsvFeatureSource,
            CsvAnnotationSource,
        )
    }
}

impl<F, A> StagePreprocessor<F, A>
where
    F: FeatureSource,
    A: AnnotationSource,
{
    /// Create a preprocessor over custom loader collaborators.
    ///
    /// Use this to plug in an instrument-native feature reader behind
    /// [`FeatureSource`].
    pub fn with_sources<P: AsRef<Path>, Q: AsRef<Path>>(
        feature_path: P,
        annotation_path: Q,
        feature_source: F,
        annotation_source: A,
    ) -> Self {
        Self {
            feature_path: feature_path.as_ref().to_path_buf(),
            annotation_path: annotation_path.as_ref().to_path_buf(),
            feature_source,
            annotation_source,
            hierarchy: GateHierarchy::default(),
            downsampler: Downsampler::new(),
            features: None,
            gates: None,
        }
    }

    /// Replace the default gating hierarchy.
    #[must_use]
    pub fn with_hierarchy(mut self, hierarchy: GateHierarchy) -> Self {
        self.hierarchy = hierarchy;
        self
    }

    /// Seed the downsampler for reproducible first-stage selection.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.downsampler = Downsampler::new().with_random_state(random_state);
        self
    }

    /// Returns the configured hierarchy.
    #[must_use]
    pub fn hierarchy(&self) -> &GateHierarchy {
        &self.hierarchy
    }

    /// Load both tables if not already cached. Idempotent: once a table is
    /// present it is never re-fetched.
    ///
    /// # Errors
    ///
    /// Propagates [`CytogateError::Load`] from either source; the failed
    /// table stays absent so a later call can retry.
    pub fn load_data(&mut self) -> Result<()> {
        if self.features.is_none() {
            self.features = Some(self.feature_source.load_features(&self.feature_path)?);
        }
        if self.gates.is_none() {
            self.gates = Some(
                self.annotation_source
                    .load_annotations(&self.annotation_path)?,
            );
        }
        Ok(())
    }

    /// First-stage subset: downsample `n` events from the full population.
    ///
    /// Positions are drawn over the annotation index, mapped to event ids,
    /// and both tables are then addressed by id.
    ///
    /// # Errors
    ///
    /// Propagates load failures, [`CytogateError::Sampling`] when `n`
    /// exceeds the population, and [`CytogateError::MissingColumn`] when
    /// the first stage's column is absent.
    pub fn initial_subset(&mut self, n: usize) -> Result<StageData> {
        self.load_data()?;
        let stage = self.first_stage()?;
        let (features, gates) = self.cached()?;

        gates.column(&stage)?;
        let positions = self.downsampler.select(gates.n_rows(), n)?;
        let events: Vec<EventId> = positions.iter().map(|&p| gates.index()[p]).collect();

        let labels = gates.select_flags(&stage, &events)?;
        let features = features.select_events(&events)?;
        Ok(StageData {
            events,
            features,
            labels,
        })
    }

    /// Subset for a stage after the first.
    ///
    /// The candidate population is the prior stage's positive ids; the
    /// labels are the named stage's own flags over that population.
    ///
    /// # Errors
    ///
    /// Returns [`CytogateError::UnknownStage`] for a name outside the
    /// hierarchy and a typed error for the first stage, which requires a
    /// sample size (use [`Self::initial_subset`]). Propagates load
    /// failures and [`CytogateError::MissingColumn`].
    pub fn stage_subset(&mut self, stage: &str) -> Result<StageData> {
        if self.hierarchy.position(stage)? == 0 {
            return Err(CytogateError::Other(format!(
                "Stage '{stage}' is the first stage and requires a sample size; \
                 use initial_subset"
            )));
        }
        self.load_data()?;
        let (features, gates) = self.cached()?;

        gates.column(stage)?;
        let events = self.hierarchy.stage_pool(stage, gates)?;
        let labels = gates.select_flags(stage, &events)?;
        let features = features.select_events(&events)?;
        Ok(StageData {
            events,
            features,
            labels,
        })
    }

    /// The loaded gate table, if a load has succeeded.
    #[must_use]
    pub fn gates(&self) -> Option<&GateTable> {
        self.gates.as_ref()
    }

    fn first_stage(&self) -> Result<String> {
        self.hierarchy
            .stages()
            .first()
            .map(|s| (*s).to_string())
            .ok_or_else(|| "Gating hierarchy has no stages".into())
    }

    fn cached(&self) -> Result<(&EventFrame, &GateTable)> {
        let features = self
            .features
            .as_ref()
            .ok_or_else(|| CytogateError::Other("Feature table not loaded".to_string()))?;
        let gates = self
            .gates
            .as_ref()
            .ok_or_else(|| CytogateError::Other("Annotation table not loaded".to_string()))?;
        Ok((features, gates))
    }
}

#[cfg(test)]
#[path = "preprocess_tests.rs"]
mod tests;
