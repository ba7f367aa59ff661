//! Random downsampling of event populations.
//!
//! Training sets are usually capped at a fixed size; the [`Downsampler`]
//! draws that subset by simple random sampling without replacement.
//!
//! # Example
//!
//! ```
//! use cytogate::sampling::Downsampler;
//!
//! let sampler = Downsampler::new().with_random_state(42);
//! let picked = sampler.select(1000, 100).expect("n within population");
//! assert_eq!(picked.len(), 100);
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{CytogateError, Result};

/// Selects a fixed-size random subset of row positions without replacement.
///
/// A selection is recomputed on every call; nothing is cached. With a
/// fixed random state the selection is reproducible across runs.
#[derive(Debug, Clone, Default)]
pub struct Downsampler {
    random_state: Option<u64>,
}

impl Downsampler {
    /// Create a new `Downsampler` drawing from thread-local entropy.
    #[must_use]
    pub fn new() -> Self {
        Self { random_state: None }
    }

    /// Set random state for reproducible selection.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Draw `n` distinct positions uniformly from `[0, population_size)`.
    ///
    /// Every size-`n` subset is equally likely. Positions are returned in
    /// selection order, not sorted.
    ///
    /// # Errors
    ///
    /// Returns [`CytogateError::Sampling`] when `n > population_size`;
    /// the request is never silently clamped.
    pub fn select(&self, population_size: usize, n: usize) -> Result<Vec<usize>> {
        if n > population_size {
            return Err(CytogateError::Sampling {
                requested: n,
                population: population_size,
            });
        }
        let picked = if let Some(seed) = self.random_state {
            let mut rng = StdRng::seed_from_u64(seed);
            rand::seq::index::sample(&mut rng, population_size, n)
        } else {
            let mut rng = rand::thread_rng();
            rand::seq::index::sample(&mut rng, population_size, n)
        };
        Ok(picked.into_vec())
    }
}
