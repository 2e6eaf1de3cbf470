// ============================================================
// Layer 3 — Sample Domain Types
// ============================================================
// The data vocabulary shared by the generator and the
// input pipeline:
//
//   PinnSample — one (point, label) pair. This is the unit
//                the dataset hands to the batcher.
//   SampleSet  — a whole split as two parallel arrays:
//                inputs [n, d] and labels [n]. This is the
//                shape the archive stores on disk.
//   DataSplits — the train set and the test set together,
//                i.e. the full content of one archive.
//
// Invariant for every SampleSet: the number of input rows
// equals the number of labels. SampleSet::new checks it once
// so downstream code never has to.
//
// Storage precision is f64 throughout this layer; narrowing
// to the consumer precision happens only in the batcher.
//
// Reference: Rust Book §5 (Structs and Methods)

use anyhow::{ensure, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// One labelled point: d coordinates and the scalar target value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinnSample {
    /// Coordinates of the point in [0,1)^d
    pub coords: Vec<f64>,

    /// Exact solution value at that point
    pub label: f64,
}

impl PinnSample {
    /// Create a new sample
    pub fn new(coords: Vec<f64>, label: f64) -> Self {
        Self { coords, label }
    }

    /// Dimensionality of this sample's point
    pub fn width(&self) -> usize {
        self.coords.len()
    }
}

/// One split (train or test) as two parallel arrays.
#[derive(Debug, Clone)]
pub struct SampleSet {
    /// Sampled points — shape [len, width]
    pub inputs: Array2<f64>,

    /// One label per point — shape [len]
    pub labels: Array1<f64>,
}

impl SampleSet {
    /// Build a sample set, checking the parallel-array invariant.
    /// A length mismatch means the arrays do not describe the same
    /// points, so it is rejected here rather than detected later.
    pub fn new(inputs: Array2<f64>, labels: Array1<f64>) -> Result<Self> {
        ensure!(
            inputs.nrows() == labels.len(),
            "sample set has {} input rows but {} labels",
            inputs.nrows(),
            labels.len(),
        );
        Ok(Self { inputs, labels })
    }

    /// Number of samples in the split
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if the split holds no samples
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Coordinates per point (columns of the input array)
    pub fn width(&self) -> usize {
        self.inputs.ncols()
    }

    /// Materialise the parallel arrays as owned samples,
    /// the form the Burn dataset needs
    pub fn to_samples(&self) -> Vec<PinnSample> {
        self.inputs
            .outer_iter()
            .zip(self.labels.iter())
            .map(|(row, &label)| PinnSample::new(row.to_vec(), label))
            .collect()
    }
}

/// The full dataset: both splits of one archive.
#[derive(Debug, Clone)]
pub struct DataSplits {
    /// Training split (streamed shuffled + repeated in train mode)
    pub train: SampleSet,

    /// Test split (streamed once, in order, in eval mode)
    pub test: SampleSet,
}

impl DataSplits {
    /// Combine two splits, checking that they describe points of
    /// the same dimensionality. Mixed widths would mean the archive
    /// was written by two different runs.
    pub fn new(train: SampleSet, test: SampleSet) -> Result<Self> {
        ensure!(
            train.width() == test.width(),
            "train split has width {} but test split has width {}",
            train.width(),
            test.width(),
        );
        Ok(Self { train, test })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1, Array2};

    #[test]
    fn test_sample_set_checks_lengths() {
        let inputs = Array2::<f64>::zeros((4, 2));
        let labels = Array1::<f64>::zeros(3);
        assert!(SampleSet::new(inputs, labels).is_err());
    }

    #[test]
    fn test_sample_set_len_and_width() {
        let set = SampleSet::new(Array2::zeros((5, 3)), Array1::zeros(5)).unwrap();
        assert_eq!(set.len(), 5);
        assert_eq!(set.width(), 3);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_to_samples_preserves_rows() {
        let inputs = array![[0.1, 0.2], [0.3, 0.4]];
        let labels = array![10.0, 20.0];
        let set     = SampleSet::new(inputs, labels).unwrap();
        let samples = set.to_samples();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].coords, vec![0.1, 0.2]);
        assert_eq!(samples[0].label, 10.0);
        assert_eq!(samples[1].coords, vec![0.3, 0.4]);
        assert_eq!(samples[1].label, 20.0);
    }

    #[test]
    fn test_splits_reject_mixed_widths() {
        let train = SampleSet::new(Array2::zeros((4, 2)), Array1::zeros(4)).unwrap();
        let test  = SampleSet::new(Array2::zeros((2, 3)), Array1::zeros(2)).unwrap();
        assert!(DataSplits::new(train, test).is_err());
    }
}
