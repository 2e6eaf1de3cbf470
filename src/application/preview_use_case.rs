// ============================================================
// Layer 2 — PreviewUseCase
// ============================================================
// Consumes the input pipeline the way a training loop would,
// without any model behind it:
//
//   Step 1: Report the generation manifest (if present)
//   Step 2: Build the pipeline for the requested mode
//   Step 3: Drain batches — capped for the infinite train
//           stream, exhaustively for the finite eval stream
//   Step 4: Log per-batch label statistics to the console
//           and append them to preview_stats.csv
//
// This doubles as an end-to-end check that the archive on
// disk and the pipeline configuration actually fit together
// before a real consumer is pointed at them.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

use anyhow::{anyhow, Result};

use crate::data::pipeline::{InputConfig, InputPipeline, Mode};
use crate::infra::manifest::ManifestStore;
use crate::infra::report::{BatchStats, StatsLogger};

// ─── Preview Configuration ───────────────────────────────────────────────────
/// Everything the preview run needs: the pipeline options plus
/// the cap on how many batches to pull from an infinite stream.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    pub data_dir:           String,
    pub mode:               Mode,
    pub batch_size:         usize,
    pub train_batch_size:   Option<usize>,
    pub eval_batch_size:    Option<usize>,
    pub shuffle:            bool,
    pub num_parallel_calls: usize,
    pub max_batches:        usize,
}

// ─── PreviewUseCase ──────────────────────────────────────────────────────────
// Owns the config and runs the preview workflow.
pub struct PreviewUseCase {
    config: PreviewConfig,
}

impl PreviewUseCase {
    /// Create a new PreviewUseCase with the given configuration
    pub fn new(config: PreviewConfig) -> Self {
        Self { config }
    }

    /// Execute the preview and return the number of batches consumed
    pub fn execute(&self) -> Result<usize> {
        let cfg = &self.config;

        // ── Step 1: Report how the archive was generated ──────────────────────
        // The manifest is informational — an archive without one
        // (e.g. produced externally) previews just fine
        match ManifestStore::new(cfg.data_dir.as_str()).load() {
            Ok(manifest) => tracing::info!(
                "Archive was generated with dim={}, train_size={}, test_size={}",
                manifest.dim,
                manifest.train_size,
                manifest.test_size,
            ),
            Err(_) => tracing::debug!("No generation manifest found — skipping"),
        }

        // ── Step 2: Build the pipeline ────────────────────────────────────────
        let input = InputConfig {
            data_dir:           cfg.data_dir.clone(),
            batch_size:         Some(cfg.batch_size),
            train_batch_size:   cfg.train_batch_size,
            eval_batch_size:    cfg.eval_batch_size,
            shuffle:            Some(cfg.shuffle),
            num_parallel_calls: cfg.num_parallel_calls,
        };
        let pipeline = InputPipeline::build(&input, cfg.mode)?;
        tracing::info!(
            "{} full batches of {} per pass over the split",
            pipeline.batches_per_epoch(),
            pipeline.batch_size(),
        );

        // ── Step 3 + 4: Drain batches and record statistics ───────────────────
        // Train streams are infinite, so they are capped; eval
        // streams end on their own
        let cap = match cfg.mode {
            Mode::Train => cfg.max_batches,
            Mode::Eval  => usize::MAX,
        };

        let logger = StatsLogger::new(cfg.data_dir.as_str())?;
        let mut consumed = 0usize;

        for (index, batch) in pipeline.iter().take(cap).enumerate() {
            let labels: Vec<f32> = batch
                .labels
                .clone()
                .into_data()
                .to_vec()
                .map_err(|e| anyhow!("Cannot read labels from batch {index}: {e:?}"))?;

            let stats = BatchStats::from_labels(index, batch.len(), &labels);
            println!(
                "Batch {:>4} | rows={} | label_mean={:.6} | label_min={:.6} | label_max={:.6}",
                stats.batch, stats.rows, stats.label_mean, stats.label_min, stats.label_max,
            );
            logger.log(&stats)?;
            consumed += 1;
        }

        tracing::info!("Preview consumed {} batches", consumed);
        Ok(consumed)
    }
}
