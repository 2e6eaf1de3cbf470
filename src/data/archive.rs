// ============================================================
// Layer 4 — Npz Archive
// ============================================================
// Persists the dataset as a single NumPy-compatible .npz file
// using the ndarray-npy crate.
//
// How .npz files work:
//   An .npz file is a ZIP archive whose entries are .npy
//   arrays, one per name. NpzWriter/NpzReader give us a typed
//   Rust API over that container, and the result stays
//   loadable from Python with np.load().
//
// The archive holds exactly four named arrays:
//
//   X_train  [train_size, d]  f64 — training points
//   u_train  [train_size]     f64 — training labels
//   X_test   [test_size, d]   f64 — test points
//   u_test   [test_size]      f64 — test labels
//
// Values are stored uncompressed at full f64 precision, so a
// write → read round trip is bit-identical. The archive is
// written once by the generator and only ever read afterwards;
// re-running the generator overwrites it in place.
//
// Reference: ndarray-npy crate documentation
//            NumPy .npy/.npz format specification
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use ndarray::{Array1, Array2};
use ndarray_npy::{NpzReader, NpzWriter};
use std::{fs, fs::File, path::PathBuf};

use crate::domain::sample::{DataSplits, SampleSet};
use crate::domain::traits::{SampleSink, SampleSource};

/// Name of the archive file inside the data directory
pub const ARCHIVE_FILENAME: &str = "data.npz";

/// Reads and writes the four-array dataset archive.
/// All paths are relative to the configured data directory.
pub struct NpzArchive {
    /// Directory holding data.npz
    dir: PathBuf,
}

impl NpzArchive {
    /// Create an archive handle pointed at a data directory.
    /// Nothing is touched on disk until save() or load() is called.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path of the archive file
    pub fn path(&self) -> PathBuf {
        self.dir.join(ARCHIVE_FILENAME)
    }
}

impl SampleSink for NpzArchive {
    /// Write both splits to data.npz, overwriting any previous archive.
    ///
    /// The data directory is created first if it does not exist
    /// (idempotent, like `mkdir -p`). Filesystem errors propagate
    /// with the offending path attached.
    fn save(&self, splits: &DataSplits) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create data directory '{}'", self.dir.display()))?;

        let path = self.path();
        let file = File::create(&path)
            .with_context(|| format!("Cannot create archive '{}'", path.display()))?;

        // NpzWriter stores each array as an uncompressed .npy
        // entry, exactly like np.savez
        let mut npz = NpzWriter::new(file);
        npz.add_array("X_train", &splits.train.inputs)?;
        npz.add_array("u_train", &splits.train.labels)?;
        npz.add_array("X_test", &splits.test.inputs)?;
        npz.add_array("u_test", &splits.test.labels)?;
        npz.finish()
            .with_context(|| format!("Cannot finalise archive '{}'", path.display()))?;

        tracing::info!(
            "Wrote archive '{}' ({} train, {} test samples)",
            path.display(),
            splits.train.len(),
            splits.test.len(),
        );
        Ok(())
    }
}

impl SampleSource for NpzArchive {
    /// Load both splits from data.npz.
    ///
    /// This is the one-time synchronous read done at pipeline
    /// construction — never per batch. A missing file is a fatal
    /// I/O error; arrays whose lengths or widths disagree are a
    /// fatal shape error.
    fn load(&self) -> Result<DataSplits> {
        let path = self.path();
        let file = File::open(&path)
            .with_context(|| format!("Cannot open archive '{}'. Run 'generate' first?", path.display()))?;

        let mut npz = NpzReader::new(file)
            .with_context(|| format!("'{}' is not a readable npz archive", path.display()))?;

        let x_train: Array2<f64> = npz
            .by_name("X_train")
            .with_context(|| format!("Archive '{}' is missing X_train", path.display()))?;
        let u_train: Array1<f64> = npz
            .by_name("u_train")
            .with_context(|| format!("Archive '{}' is missing u_train", path.display()))?;
        let x_test: Array2<f64> = npz
            .by_name("X_test")
            .with_context(|| format!("Archive '{}' is missing X_test", path.display()))?;
        let u_test: Array1<f64> = npz
            .by_name("u_test")
            .with_context(|| format!("Archive '{}' is missing u_test", path.display()))?;

        // SampleSet / DataSplits re-check the parallel-array and
        // equal-width invariants, so a hand-edited or truncated
        // archive fails here instead of corrupting batches later
        let train = SampleSet::new(x_train, u_train)
            .with_context(|| format!("Train arrays in '{}' are inconsistent", path.display()))?;
        let test = SampleSet::new(x_test, u_test)
            .with_context(|| format!("Test arrays in '{}' are inconsistent", path.display()))?;
        let splits = DataSplits::new(train, test)
            .with_context(|| format!("Splits in '{}' have different widths", path.display()))?;

        tracing::debug!(
            "Loaded archive '{}' ({} train, {} test samples, width {})",
            path.display(),
            splits.train.len(),
            splits.test.len(),
            splits.train.width(),
        );
        Ok(splits)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generator::Generator;
    use crate::domain::target::Dimensionality;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip_is_bit_identical() {
        let dir     = tempdir().unwrap();
        let archive = NpzArchive::new(dir.path());
        let splits  = Generator::new(Dimensionality::ThreeD, 32, 8).generate();

        archive.save(&splits).unwrap();
        let loaded = archive.load().unwrap();

        // f64 in, f64 out — no precision loss at the storage layer
        assert_eq!(loaded.train.inputs, splits.train.inputs);
        assert_eq!(loaded.train.labels, splits.train.labels);
        assert_eq!(loaded.test.inputs, splits.test.inputs);
        assert_eq!(loaded.test.labels, splits.test.labels);
    }

    #[test]
    fn test_save_is_idempotent_overwrite() {
        let dir     = tempdir().unwrap();
        let archive = NpzArchive::new(dir.path());

        let first  = Generator::new(Dimensionality::TwoD, 16, 4).generate();
        let second = Generator::new(Dimensionality::TwoD, 8, 2).generate();

        archive.save(&first).unwrap();
        archive.save(&second).unwrap();

        // The second write fully replaces the first
        let loaded = archive.load().unwrap();
        assert_eq!(loaded.train.len(), 8);
        assert_eq!(loaded.test.len(), 2);

        // Exactly one archive file, no stale leftovers
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_missing_archive_is_an_error() {
        let dir     = tempdir().unwrap();
        let archive = NpzArchive::new(dir.path());
        assert!(archive.load().is_err());
    }

    #[test]
    fn test_mismatched_lengths_are_rejected() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join(ARCHIVE_FILENAME);

        // Hand-write an archive where u_train has the wrong length
        let mut npz = NpzWriter::new(File::create(&path).unwrap());
        npz.add_array("X_train", &Array2::<f64>::zeros((4, 2))).unwrap();
        npz.add_array("u_train", &Array1::<f64>::zeros(3)).unwrap();
        npz.add_array("X_test", &Array2::<f64>::zeros((2, 2))).unwrap();
        npz.add_array("u_test", &Array1::<f64>::zeros(2)).unwrap();
        npz.finish().unwrap();

        let err = NpzArchive::new(dir.path()).load().unwrap_err();
        assert!(err.to_string().contains("inconsistent"));
    }

    #[test]
    fn test_mixed_widths_are_rejected() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join(ARCHIVE_FILENAME);

        // Train points are 2-D but test points are 3-D
        let mut npz = NpzWriter::new(File::create(&path).unwrap());
        npz.add_array("X_train", &Array2::<f64>::zeros((4, 2))).unwrap();
        npz.add_array("u_train", &Array1::<f64>::zeros(4)).unwrap();
        npz.add_array("X_test", &Array2::<f64>::zeros((2, 3))).unwrap();
        npz.add_array("u_test", &Array1::<f64>::zeros(2)).unwrap();
        npz.finish().unwrap();

        assert!(NpzArchive::new(dir.path()).load().is_err());
    }
}
