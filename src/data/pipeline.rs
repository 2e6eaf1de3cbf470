// ============================================================
// Layer 4 — Input Pipeline
// ============================================================
// Turns the persisted archive into a ready-to-consume stream
// of tensor batches, parameterised by execution mode:
//
//   TRAIN — train split, full-dataset shuffle (reshuffled
//           every epoch), repeated forever. The consumer can
//           draw an unbounded number of batches across epochs
//           without rebuilding the pipeline.
//   EVAL  — test split, in order, single pass. The stream
//           ends after exactly floor(test_size / batch_size)
//           batches; rebuilding yields a fresh stream.
//
// Shared semantics for both modes:
//   - The archive is read ONCE, synchronously, at build time.
//     Iteration never touches the filesystem.
//   - Batches are contiguous groups of exactly batch_size
//     samples; a trailing partial batch is dropped.
//   - Shuffling reorders samples BEFORE batching, so batch
//     order itself is always the production order.
//   - A batch size larger than the split yields an empty
//     stream, not an error — even in train mode, where an
//     empty epoch terminates the stream instead of spinning.
//
// Batch preparation runs through Burn's DataLoader on a single
// ordered partition. num_parallel_calls is accepted as an
// advisory parallelism hint, but batches always come from one
// worker: a multi-worker loader partitions the dataset, every
// partition batches (and leaves a trailing remainder) on its
// own, and the partitions race into a shared channel — both the
// floor(split / batch_size) count and the batch order would be
// lost. The per-batch transform is a trivial cast-and-stack, so
// one worker is also the sensible throughput choice.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use burn::backend::NdArray;
use burn::data::dataloader::{DataLoader, DataLoaderBuilder, DataLoaderIterator};
use rand::Rng;

use crate::data::archive::NpzArchive;
use crate::data::batcher::{PinnBatch, PinnBatcher};
use crate::data::dataset::PinnDataset;
use crate::domain::traits::SampleSource;

/// Backend the pipeline materialises batches on.
/// The data pipeline is CPU work, so the ndarray backend is fixed
/// here the same way the consumer picks its training backend.
pub type PipelineBackend = NdArray<f32>;

/// Which split the pipeline serves and how it streams it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Train split — shuffled (if configured) and repeated forever
    Train,
    /// Test split — ordered, finite, single pass
    Eval,
}

// ─── Input Configuration ──────────────────────────────────────────────────────
/// All options for building a pipeline. The optional fields carry
/// explicit fallback rules instead of dict lookups:
///
///   batch size:  train_batch_size / eval_batch_size (per mode),
///                falling back to batch_size, else a config error
///   shuffle:     required in train mode, ignored in eval mode
///   parallelism: advisory; 0 means "choose automatically"
///
/// The config is built fresh per invocation and never persisted —
/// the manifest records how the data was generated, not how it
/// is streamed.
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Directory holding the data.npz archive
    pub data_dir: String,

    /// Fallback batch size when no mode-specific override is set
    pub batch_size: Option<usize>,

    /// Batch size override used only in train mode
    pub train_batch_size: Option<usize>,

    /// Batch size override used only in eval mode
    pub eval_batch_size: Option<usize>,

    /// Whether train mode shuffles the full split each epoch.
    /// Must be set when building a train pipeline
    pub shuffle: Option<bool>,

    /// Advisory parallelism hint; batch preparation always runs
    /// on one ordered worker regardless (see module header)
    pub num_parallel_calls: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            data_dir:           "pinndata".to_string(),
            batch_size:         Some(256),
            train_batch_size:   None,
            eval_batch_size:    None,
            shuffle:            Some(true),
            num_parallel_calls: 0,
        }
    }
}

impl InputConfig {
    /// Resolve the effective batch size for a mode.
    /// Mode-specific override first, then the shared fallback.
    fn resolved_batch_size(&self, mode: Mode) -> Result<usize> {
        let specific = match mode {
            Mode::Train => self.train_batch_size,
            Mode::Eval  => self.eval_batch_size,
        };

        let Some(batch_size) = specific.or(self.batch_size) else {
            bail!("no batch size configured: set batch_size or a mode-specific override");
        };
        if batch_size == 0 {
            bail!("batch_size must be positive");
        }
        Ok(batch_size)
    }

    /// Resolve the shuffle flag. Only train mode consults it,
    /// and there it is mandatory.
    fn resolved_shuffle(&self, mode: Mode) -> Result<bool> {
        match mode {
            Mode::Train => self
                .shuffle
                .context("shuffle must be set when building a train-mode pipeline"),
            Mode::Eval => Ok(false),
        }
    }

}

// ─── InputPipeline ────────────────────────────────────────────────────────────
/// A built pipeline: the loaded split behind a Burn DataLoader,
/// plus the streaming rules for its mode.
pub struct InputPipeline {
    loader:     Arc<dyn DataLoader<PinnBatch<PipelineBackend>>>,
    batch_size: usize,
    mode:       Mode,
}

impl InputPipeline {
    /// Build a pipeline for one mode.
    ///
    /// Loads the archive (the only I/O the pipeline ever does),
    /// selects the split, and wires dataset → batcher → loader.
    /// Configuration errors and archive errors are fatal here,
    /// before any batch is produced.
    pub fn build(config: &InputConfig, mode: Mode) -> Result<Self> {
        let batch_size = config.resolved_batch_size(mode)?;
        let shuffle    = config.resolved_shuffle(mode)?;

        let splits = NpzArchive::new(config.data_dir.as_str()).load()?;
        let split = match mode {
            Mode::Train => splits.train,
            Mode::Eval  => splits.test,
        };

        if config.num_parallel_calls > 1 {
            tracing::debug!(
                "Parallelism hint {} noted; batching stays on one ordered worker",
                config.num_parallel_calls,
            );
        }
        tracing::info!(
            "Building {:?} pipeline: {} samples, batch_size={}, shuffle={}",
            mode,
            split.len(),
            batch_size,
            shuffle,
        );

        let dataset = PinnDataset::from_set(&split);
        let batcher = PinnBatcher::<PipelineBackend>::new(Default::default());

        // A single worker is load-bearing: more than one makes the
        // loader partition the dataset, and each partition would
        // drop its own trailing remainder and race its batches into
        // a shared channel out of order
        let mut builder = DataLoaderBuilder::new(batcher)
            .batch_size(batch_size)
            .num_workers(1);

        if shuffle {
            // Fresh seed per pipeline — the dataset values are
            // unseeded anyway, so the shuffle order is too. Burn
            // reshuffles the whole split at every epoch start
            builder = builder.shuffle(rand::thread_rng().gen());
        }

        Ok(Self {
            loader: builder.build(dataset),
            batch_size,
            mode,
        })
    }

    /// Effective batch size after fallback resolution
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of full batches one pass over the split produces.
    /// The trailing remainder is not counted — it is dropped
    pub fn batches_per_epoch(&self) -> usize {
        self.loader.num_items() / self.batch_size
    }

    /// Start streaming batches.
    ///
    /// Train mode: an infinite iterator (cap it with .take()).
    /// Eval mode: ends after batches_per_epoch() items.
    pub fn iter(&self) -> Batches<'_> {
        Batches {
            loader: self.loader.as_ref(),
            epoch: None,
            batch_size: self.batch_size,
            repeat: self.mode == Mode::Train,
            // An epoch with zero full batches must terminate
            // instead of looping over empty epochs forever
            done: self.batches_per_epoch() == 0,
        }
    }
}

// ─── Batch Stream ─────────────────────────────────────────────────────────────
/// Lazy batch iterator over a built pipeline.
///
/// Wraps the DataLoader's per-epoch iterator and adds the two
/// contract rules Burn does not provide by itself:
///   - partial trailing batches are filtered out
///   - train mode chains epochs end to end, indefinitely
pub struct Batches<'a> {
    loader:     &'a dyn DataLoader<PinnBatch<PipelineBackend>>,
    epoch:      Option<Box<dyn DataLoaderIterator<PinnBatch<PipelineBackend>> + 'a>>,
    batch_size: usize,
    repeat:     bool,
    done:       bool,
}

impl Iterator for Batches<'_> {
    type Item = PinnBatch<PipelineBackend>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let loader = self.loader;
            let epoch  = self.epoch.get_or_insert_with(|| loader.iter());

            match epoch.next() {
                // Only full batches reach the consumer
                Some(batch) if batch.len() == self.batch_size => return Some(batch),

                // The trailing remainder of an epoch — dropped
                Some(_) => continue,

                // Epoch exhausted
                None => {
                    self.epoch = None;
                    if !self.repeat {
                        self.done = true;
                        return None;
                    }
                    // Train mode: fall through and start the
                    // next epoch on the following loop turn
                }
            }
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generator::Generator;
    use crate::domain::target::Dimensionality;
    use crate::domain::traits::SampleSink;
    use tempfile::{tempdir, TempDir};

    /// Write a small archive and return the directory plus a
    /// config pointing at it
    fn setup(train: usize, test: usize) -> (TempDir, InputConfig) {
        let dir = tempdir().unwrap();
        let splits = Generator::new(Dimensionality::TwoD, train, test).generate();
        NpzArchive::new(dir.path()).save(&splits).unwrap();

        let config = InputConfig {
            data_dir: dir.path().to_string_lossy().into_owned(),
            batch_size: Some(4),
            train_batch_size: None,
            eval_batch_size: None,
            shuffle: Some(false),
            num_parallel_calls: 0,
        };
        (dir, config)
    }

    fn labels_of(batch: &PinnBatch<PipelineBackend>) -> Vec<f32> {
        batch.labels.clone().into_data().to_vec().unwrap()
    }

    #[test]
    fn test_eval_yields_floor_batches() {
        let (_dir, config) = setup(8, 10);
        let pipeline = InputPipeline::build(&config, Mode::Eval).unwrap();

        // 10 samples / batch 4 → 2 full batches, remainder dropped
        assert_eq!(pipeline.batches_per_epoch(), 2);
        let batches: Vec<_> = pipeline.iter().collect();
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|b| b.len() == 4));
    }

    #[test]
    fn test_eval_oversized_batch_is_empty_not_error() {
        let (_dir, config) = setup(8, 3);
        let pipeline = InputPipeline::build(&config, Mode::Eval).unwrap();

        // floor(3 / 4) = 0 batches — boundary case, no error
        assert_eq!(pipeline.batches_per_epoch(), 0);
        assert_eq!(pipeline.iter().count(), 0);
    }

    #[test]
    fn test_eval_preserves_sample_order() {
        let (dir, config) = setup(8, 8);
        let splits = NpzArchive::new(dir.path()).load().unwrap();
        let pipeline = InputPipeline::build(&config, Mode::Eval).unwrap();

        let streamed: Vec<f32> = pipeline.iter().flat_map(|b| labels_of(&b)).collect();
        let expected: Vec<f32> = splits.test.labels.iter().map(|&u| u as f32).collect();
        assert_eq!(streamed, expected);
    }

    #[test]
    fn test_eval_stream_is_restartable_by_rebuilding() {
        let (_dir, config) = setup(8, 8);

        let first: Vec<usize> = InputPipeline::build(&config, Mode::Eval)
            .unwrap()
            .iter()
            .map(|b| b.len())
            .collect();
        let second: Vec<usize> = InputPipeline::build(&config, Mode::Eval)
            .unwrap()
            .iter()
            .map(|b| b.len())
            .collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_train_stream_is_infinite() {
        let (_dir, config) = setup(8, 4);
        let pipeline = InputPipeline::build(&config, Mode::Train).unwrap();

        // 2 full batches per epoch, but the stream keeps going
        assert_eq!(pipeline.batches_per_epoch(), 2);
        assert_eq!(pipeline.iter().take(9).count(), 9);
    }

    #[test]
    fn test_train_cycle_preserved_without_shuffle() {
        let (_dir, config) = setup(16, 4);
        let pipeline = InputPipeline::build(&config, Mode::Train).unwrap();
        let cycle = pipeline.batches_per_epoch();
        assert_eq!(cycle, 4);

        let two_epochs: Vec<Vec<f32>> = pipeline
            .iter()
            .take(cycle * 2)
            .map(|b| labels_of(&b))
            .collect();

        // With shuffle disabled, epoch two replays epoch one
        assert_eq!(two_epochs[..cycle], two_epochs[cycle..]);
    }

    #[test]
    fn test_train_drops_trailing_remainder_every_epoch() {
        let (_dir, config) = setup(10, 4);
        let pipeline = InputPipeline::build(&config, Mode::Train).unwrap();

        // 10 / 4 → 2 full batches per epoch; across epochs every
        // yielded batch is still exactly full-size
        for batch in pipeline.iter().take(7) {
            assert_eq!(batch.len(), 4);
        }
    }

    #[test]
    fn test_train_empty_epoch_terminates() {
        let (_dir, mut config) = setup(2, 2);
        config.batch_size = Some(4);
        let pipeline = InputPipeline::build(&config, Mode::Train).unwrap();

        // batch_size > train split: empty stream, not an endless spin
        assert_eq!(pipeline.iter().next().map(|b| b.len()), None);
    }

    #[test]
    fn test_train_shuffle_flag_is_required() {
        let (_dir, mut config) = setup(8, 4);
        config.shuffle = None;

        assert!(InputPipeline::build(&config, Mode::Train).is_err());
        // Eval never consults the flag
        assert!(InputPipeline::build(&config, Mode::Eval).is_ok());
    }

    #[test]
    fn test_shuffled_train_batches_stay_full_sized() {
        let (_dir, mut config) = setup(12, 4);
        config.shuffle = Some(true);
        let pipeline = InputPipeline::build(&config, Mode::Train).unwrap();

        // Shuffling reorders samples, not batch geometry
        for batch in pipeline.iter().take(6) {
            assert_eq!(batch.len(), 4);
        }
    }

    #[test]
    fn test_mode_specific_batch_size_overrides_fallback() {
        let (_dir, mut config) = setup(16, 16);
        config.train_batch_size = Some(8);
        config.eval_batch_size  = Some(2);

        let train = InputPipeline::build(&config, Mode::Train).unwrap();
        let eval  = InputPipeline::build(&config, Mode::Eval).unwrap();
        assert_eq!(train.batch_size(), 8);
        assert_eq!(eval.batch_size(), 2);
        assert_eq!(eval.iter().count(), 8);
    }

    #[test]
    fn test_missing_batch_size_is_a_config_error() {
        let (_dir, mut config) = setup(8, 4);
        config.batch_size = None;

        assert!(InputPipeline::build(&config, Mode::Eval).is_err());

        // A mode-specific override alone is enough
        config.eval_batch_size = Some(2);
        assert!(InputPipeline::build(&config, Mode::Eval).is_ok());
    }

    #[test]
    fn test_zero_batch_size_is_a_config_error() {
        let (_dir, mut config) = setup(8, 4);
        config.batch_size = Some(0);
        assert!(InputPipeline::build(&config, Mode::Eval).is_err());
    }

    #[test]
    fn test_missing_archive_is_fatal_at_build() {
        let dir = tempdir().unwrap();
        let config = InputConfig {
            data_dir: dir.path().to_string_lossy().into_owned(),
            ..InputConfig::default()
        };
        assert!(InputPipeline::build(&config, Mode::Eval).is_err());
    }

    #[test]
    fn test_parallel_hint_keeps_floor_batch_count() {
        // 8 samples / batch 4 must give exactly 2 batches even when
        // the hint does not divide the split evenly. Partitioned
        // workers would each drop a remainder and lose one of them
        let (_dir, mut config) = setup(8, 8);
        config.num_parallel_calls = 3;
        let pipeline = InputPipeline::build(&config, Mode::Eval).unwrap();

        assert_eq!(pipeline.batches_per_epoch(), 2);
        let batches: Vec<_> = pipeline.iter().collect();
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|b| b.len() == 4));
    }

    #[test]
    fn test_parallel_hint_keeps_eval_order() {
        let (dir, mut config) = setup(8, 12);
        config.num_parallel_calls = 4;
        let splits = NpzArchive::new(dir.path()).load().unwrap();
        let pipeline = InputPipeline::build(&config, Mode::Eval).unwrap();

        // Batches arrive in archive order, not interleaved
        let streamed: Vec<f32> = pipeline.iter().flat_map(|b| labels_of(&b)).collect();
        let expected: Vec<f32> = splits.test.labels.iter().map(|&u| u as f32).collect();
        assert_eq!(streamed, expected);
    }
}
