// ============================================================
// Layer 5 — Generation Manifest
// ============================================================
// Saves and restores the GenerateConfig as JSON beside the
// archive file.
//
// Why persist the config separately?
//   The npz archive stores only the arrays. Without the
//   manifest there is no record of which dimensionality or
//   sizes produced them, and the preview command could not
//   report the provenance of what it streams.
//
// File naming convention:
//   pinndata/
//     data.npz              ← the four sample arrays
//     generate_config.json  ← how they were produced
//     preview_stats.csv     ← batch stats from preview runs
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json crate documentation

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::application::generate_use_case::GenerateConfig;

/// Name of the manifest file inside the data directory
pub const MANIFEST_FILENAME: &str = "generate_config.json";

/// Manages saving and loading of the generation manifest.
pub struct ManifestStore {
    /// Directory the manifest lives in (same as the archive's)
    dir: PathBuf,
}

impl ManifestStore {
    /// Create a manifest store pointed at a data directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Save the generation configuration to JSON.
    /// Creates the directory if needed; overwrites a previous manifest.
    pub fn save(&self, cfg: &GenerateConfig) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create data directory '{}'", self.dir.display()))?;

        let path = self.dir.join(MANIFEST_FILENAME);

        // to_string_pretty adds indentation for readability
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write manifest to '{}'", path.display()))?;

        tracing::debug!("Saved generation manifest to '{}'", path.display());
        Ok(())
    }

    /// Load the generation configuration from JSON.
    /// Fails if no manifest has been written to this directory.
    pub fn load(&self) -> Result<GenerateConfig> {
        let path = self.dir.join(MANIFEST_FILENAME);

        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read manifest from '{}'", path.display()))?;

        // Deserialise JSON back into the config struct
        Ok(serde_json::from_str(&json)?)
    }
}
