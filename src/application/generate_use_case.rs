// ============================================================
// Layer 2 — GenerateUseCase
// ============================================================
// Orchestrates dataset generation in order:
//
//   Step 1: Validate the configuration   (Layer 3 - domain)
//   Step 2: Sample and label the splits  (Layer 4 - data)
//   Step 3: Persist the npz archive      (Layer 4 - data)
//   Step 4: Persist the config manifest  (Layer 5 - infra)
//
// The whole run is a single synchronous pass with no
// intermediate recoverable state: any failure aborts with a
// descriptive error and nothing is retried.
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::data::{archive::NpzArchive, generator::Generator};
use crate::domain::target::Dimensionality;
use crate::domain::traits::SampleSink;
use crate::infra::manifest::ManifestStore;

// ─── Generation Configuration ────────────────────────────────────────────────
// All parameters for one generation run.
// Serialisable so the run can be recorded next to the archive
// and reported later by the preview command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Spatial dimensionality (2 or 3)
    pub dim: usize,

    /// Number of training points
    pub train_size: usize,

    /// Number of test points
    pub test_size: usize,

    /// Directory for data.npz and generate_config.json
    pub data_dir: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            dim:        3,
            train_size: 1 << 20,
            test_size:  1 << 10,
            data_dir:   "pinndata".to_string(),
        }
    }
}

// ─── GenerateUseCase ─────────────────────────────────────────────────────────
// Owns the config and runs the full generation workflow.
pub struct GenerateUseCase {
    config: GenerateConfig,
}

impl GenerateUseCase {
    /// Create a new GenerateUseCase with the given configuration
    pub fn new(config: GenerateConfig) -> Self {
        Self { config }
    }

    /// Execute the full generation workflow end to end
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Validate before touching the filesystem ───────────────────
        let dim = Dimensionality::from_dim(cfg.dim)?;
        ensure!(cfg.train_size > 0, "train_size must be positive");
        ensure!(cfg.test_size > 0, "test_size must be positive");

        // ── Step 2: Sample both splits ────────────────────────────────────────
        // Unseeded sampling: the shapes are reproducible, the
        // values are fresh on every run
        tracing::info!(
            "Sampling {} train and {} test points in [0,1)^{}",
            cfg.train_size,
            cfg.test_size,
            dim.width(),
        );
        let generator = Generator::new(dim, cfg.train_size, cfg.test_size);
        let splits    = generator.generate();

        // ── Step 3: Write the archive (overwrites a previous one) ─────────────
        let archive = NpzArchive::new(cfg.data_dir.as_str());
        archive.save(&splits)?;

        // ── Step 4: Record how the data was produced ──────────────────────────
        // preview reads this back to report the run parameters
        ManifestStore::new(cfg.data_dir.as_str()).save(cfg)?;

        tracing::info!(
            "Done: X_train [{}, {}], u_train [{}], X_test [{}, {}], u_test [{}]",
            splits.train.len(),
            splits.train.width(),
            splits.train.len(),
            splits.test.len(),
            splits.test.width(),
            splits.test.len(),
        );
        Ok(())
    }
}
