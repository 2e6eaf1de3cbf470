// ============================================================
// Layer 4 — Burn Dataset
// ============================================================
// Adapts one loaded split to Burn's Dataset trait so the
// DataLoader can pull individual samples by index.
//
// The whole split lives in memory — it was already loaded
// from the archive in one synchronous read, so get() is just
// an indexed clone, never I/O.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

use burn::data::dataset::Dataset;

use crate::domain::sample::{PinnSample, SampleSet};

/// An in-memory split of labelled points, indexable by Burn's
/// DataLoader.
pub struct PinnDataset {
    samples: Vec<PinnSample>,
}

impl PinnDataset {
    /// Wrap an already materialised list of samples
    pub fn new(samples: Vec<PinnSample>) -> Self {
        Self { samples }
    }

    /// Build the dataset from a split's parallel arrays
    pub fn from_set(set: &SampleSet) -> Self {
        Self::new(set.to_samples())
    }
}

impl Dataset<PinnSample> for PinnDataset {
    fn get(&self, index: usize) -> Option<PinnSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
