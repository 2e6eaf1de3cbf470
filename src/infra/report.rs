// ============================================================
// Layer 5 — Batch Statistics Logger
// ============================================================
// Records per-batch label statistics from a preview run to a
// CSV file.
//
// Why log statistics to CSV?
//   - Easy to open in a spreadsheet or plot with one line
//     of Python
//   - Gives a quick sanity check that the archive contains
//     sensible values (the 2-D target, for example, stays
//     inside [0, sin(1)^2))
//   - Provides a permanent record across preview runs
//
// Statistics recorded per batch:
//   - batch:      the batch index within the run (0, 1, ...)
//   - rows:       samples in the batch (always the batch size)
//   - label_mean: mean of the batch's labels
//   - label_min:  smallest label in the batch
//   - label_max:  largest label in the batch
//
// Output file: {data_dir}/preview_stats.csv
//
// Example CSV output:
//   batch,rows,label_mean,label_min,label_max
//   0,256,0.248310,0.000412,0.705532
//   1,256,0.251027,0.001288,0.707046
//   ...
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

/// Name of the statistics file inside the data directory
pub const STATS_FILENAME: &str = "preview_stats.csv";

/// One row of statistics for a single consumed batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStats {
    /// The batch index within the preview run (starts at 0)
    pub batch: usize,

    /// Number of samples in the batch
    pub rows: usize,

    /// Mean of the batch's labels
    pub label_mean: f64,

    /// Smallest label in the batch
    pub label_min: f64,

    /// Largest label in the batch
    pub label_max: f64,
}

impl BatchStats {
    /// Compute the statistics of one batch's labels.
    /// Labels arrive at consumer precision (f32); the
    /// accumulation runs in f64 to keep the mean honest.
    pub fn from_labels(batch: usize, rows: usize, labels: &[f32]) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0f64;

        for &v in labels {
            let v = f64::from(v);
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }

        if labels.is_empty() {
            // No labels, no extremes — report zeros instead of infinities
            min = 0.0;
            max = 0.0;
        }
        let label_mean = if labels.is_empty() { 0.0 } else { sum / labels.len() as f64 };

        Self { batch, rows, label_mean, label_min: min, label_max: max }
    }
}

/// Appends batch statistics to a CSV file for later analysis.
pub struct StatsLogger {
    /// Full path to the CSV file
    csv_path: PathBuf,
}

impl StatsLogger {
    /// Create a new StatsLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();

        // Create directory if it doesn't exist
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join(STATS_FILENAME);

        // Write CSV header only if file is new.
        // This allows appending to an existing log across runs
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "batch,rows,label_mean,label_min,label_max")?;
            tracing::debug!("Created stats CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one batch's statistics as a new row in the CSV.
    ///
    /// Uses OpenOptions with append=true so we add to the file
    /// without overwriting previous rows.
    pub fn log(&self, s: &BatchStats) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(
            f,
            "{},{},{:.6},{:.6},{:.6}",
            s.batch,
            s.rows,
            s.label_mean,
            s.label_min,
            s.label_max,
        )?;

        Ok(())
    }

    /// Return the path to the stats CSV file
    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}
