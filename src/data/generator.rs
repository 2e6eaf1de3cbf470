// ============================================================
// Layer 4 — Synthetic Data Generator
// ============================================================
// Produces the regression dataset from scratch:
//
//   1. Sample n points, each coordinate drawn independently
//      and uniformly from [0,1)
//   2. Label every point with the exact target function
//   3. Do this twice — once for the train split, once for
//      the test split
//
// The RNG is deliberately unseeded (thread_rng): re-running
// the generator reproduces the SHAPES of the arrays, not the
// values. Consumers that need fixed data keep the archive
// file around instead of re-generating.
//
// Labels are computed in f64 and stored in f64, so nothing
// is lost between generation and the archive. The narrowing
// cast to the consumer precision happens much later, in the
// batcher.
//
// Reference: rand crate documentation
//            Rust Book §13 (Iterators and Closures)

use ndarray::{Array1, Array2};
use rand::Rng;

use crate::domain::sample::{DataSplits, SampleSet};
use crate::domain::target::Dimensionality;

/// Samples and labels both splits of the synthetic dataset.
pub struct Generator {
    /// Width of every sampled point and target function selector
    dim: Dimensionality,

    /// Number of points in the train split
    train_size: usize,

    /// Number of points in the test split
    test_size: usize,
}

impl Generator {
    /// Create a generator for the given dimensionality and split sizes
    pub fn new(dim: Dimensionality, train_size: usize, test_size: usize) -> Self {
        Self { dim, train_size, test_size }
    }

    /// Sample and label both splits.
    ///
    /// Pure in-memory work — persisting the result is the
    /// archive's job, not the generator's.
    pub fn generate(&self) -> DataSplits {
        let train = self.sample_set(self.train_size);
        let test  = self.sample_set(self.test_size);

        tracing::debug!(
            "Generated {} train and {} test points of width {}",
            train.len(),
            test.len(),
            self.dim.width(),
        );

        // Both sets were sampled with the same width, so the
        // cross-split invariant holds by construction
        DataSplits { train, test }
    }

    /// Sample one split: n uniform points plus their labels
    fn sample_set(&self, n: usize) -> SampleSet {
        let width = self.dim.width();
        let mut rng = rand::thread_rng();

        // gen::<f64>() draws from [0,1), matching the domain
        // the target function is defined over
        let inputs = Array2::from_shape_fn((n, width), |_| rng.gen::<f64>());

        // One label per row — the exact solution at that point
        let labels = Array1::from_shape_fn(n, |i| self.dim.evaluate(inputs.row(i)));

        // Lengths are equal by construction ([n, d] rows vs n labels)
        SampleSet { inputs, labels }
    }
}
