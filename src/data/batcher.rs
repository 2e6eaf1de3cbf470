// ============================================================
// Layer 4 — Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<PinnSample>
// into backend tensors.
//
// What is a Batcher?
//   A Batcher takes a list of individual samples and stacks
//   them into a single batch tensor. This is where the batch
//   dimension is born.
//
// How batching works here:
//   Input:  Vec of N PinnSamples, each with d coordinates
//   Output: PinnBatch with inputs [N, d] and labels [N]
//
//   We flatten all coordinates into one long Vec, then reshape:
//   [p1_x0, p1_x1, ..., p2_x0, ..., pN_xd] → [N, d]
//
// This is also where the precision narrows: the archive stores
// f64, but the consumer receives f32 tensors. Inputs and labels
// are cast identically — the labels are a continuous regression
// target and must stay floating point, never an integer type.
//
// Reference: Burn Book §4 (Batcher)
//            Rust Book §8 (Vectors)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::domain::sample::PinnSample;

// ─── PinnBatch ────────────────────────────────────────────────────────────────
/// A batch of labelled points ready for a model forward pass.
/// Both tensors have batch_size as their first dimension.
///
/// B is the Burn Backend (e.g. NdArray) — generic so the same
/// batcher works on any device.
#[derive(Debug, Clone)]
pub struct PinnBatch<B: Backend> {
    /// Point coordinates — shape: [batch_size, d], f32
    pub inputs: Tensor<B, 2>,

    /// Target values — shape: [batch_size], f32
    pub labels: Tensor<B, 1>,
}

impl<B: Backend> PinnBatch<B> {
    /// Number of samples in this batch
    pub fn len(&self) -> usize {
        self.inputs.dims()[0]
    }

    /// True if the batch holds no samples
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ─── PinnBatcher ──────────────────────────────────────────────────────────────
/// The batcher struct — holds the target device so tensors
/// are created in the right place.
#[derive(Clone, Debug)]
pub struct PinnBatcher<B: Backend> {
    /// The device to create tensors on
    pub device: B::Device,
}

impl<B: Backend> PinnBatcher<B> {
    /// Create a new batcher for the given device
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

// ─── Burn Batcher Trait Implementation ────────────────────────────────────────
// This is what makes PinnBatcher work with Burn's DataLoader.
// The DataLoader calls .batch(items) with each mini-batch of samples.
impl<B: Backend> Batcher<PinnSample, PinnBatch<B>> for PinnBatcher<B> {
    /// Convert a Vec of PinnSamples into a single PinnBatch.
    ///
    /// Steps:
    ///   1. Flatten all coordinates into one Vec<f32> (the cast)
    ///   2. Create a 1D tensor and reshape to [batch_size, d]
    ///   3. Collect the labels into a 1D f32 tensor
    fn batch(&self, items: Vec<PinnSample>) -> PinnBatch<B> {
        let batch_size = items.len();
        // All points in one archive have the same width
        let width = items.first().map_or(0, |s| s.width());

        // ── Flatten and cast coordinates ──────────────────────────────────────
        // f64 storage precision → f32 consumer precision
        let coords_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.coords.iter().map(|&x| x as f32))
            .collect();

        // ── Cast labels with the SAME element type as the inputs ──────────────
        let labels_flat: Vec<f32> = items
            .iter()
            .map(|s| s.label as f32)
            .collect();

        // ── Create tensors ────────────────────────────────────────────────────
        let inputs = Tensor::<B, 1>::from_floats(coords_flat.as_slice(), &self.device)
            .reshape([batch_size, width]);

        let labels = Tensor::<B, 1>::from_floats(labels_flat.as_slice(), &self.device);

        PinnBatch { inputs, labels }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn sample(coords: Vec<f64>, label: f64) -> PinnSample {
        PinnSample::new(coords, label)
    }

    #[test]
    fn test_batch_shapes() {
        let batcher = PinnBatcher::<TestBackend>::new(Default::default());
        let batch = batcher.batch(vec![
            sample(vec![0.1, 0.2, 0.3], 1.0),
            sample(vec![0.4, 0.5, 0.6], 2.0),
        ]);

        assert_eq!(batch.inputs.dims(), [2, 3]);
        assert_eq!(batch.labels.dims(), [2]);
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn test_values_are_f32_casts() {
        let batcher = PinnBatcher::<TestBackend>::new(Default::default());
        let batch   = batcher.batch(vec![sample(vec![0.123_456_789_012_345, 0.9], 0.777)]);

        let inputs: Vec<f32> = batch.inputs.into_data().to_vec().unwrap();
        let labels: Vec<f32> = batch.labels.into_data().to_vec().unwrap();

        // Exactly the narrowing cast, applied element-wise
        assert_eq!(inputs, vec![0.123_456_789_012_345f64 as f32, 0.9f64 as f32]);
        assert_eq!(labels, vec![0.777f64 as f32]);
    }

    #[test]
    fn test_labels_stay_floating_point() {
        // A fractional label must survive batching with its fraction
        // intact — labels are a regression target, not class indices
        let batcher = PinnBatcher::<TestBackend>::new(Default::default());
        let batch   = batcher.batch(vec![sample(vec![0.5, 0.5], 0.25)]);

        let labels: Vec<f32> = batch.labels.into_data().to_vec().unwrap();
        assert_eq!(labels, vec![0.25f32]);
    }
}
