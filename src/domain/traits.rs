// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Traits are Rust's way of defining shared behaviour —
// similar to interfaces in Java or abstract classes in Python.
//
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - NpzArchive implements SampleSource and SampleSink
//   - A future Hdf5Archive could implement them too
//   - The use cases only see the traits and would work
//     with either storage format unchanged
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use anyhow::Result;
use crate::domain::sample::DataSplits;

// ─── SampleSource ─────────────────────────────────────────────────────────────
/// Any component that can load both dataset splits from storage.
///
/// Implementations:
///   - NpzArchive → reads the four named arrays from data.npz
pub trait SampleSource {
    /// Load the train and test splits.
    /// Fails if the storage is missing or the arrays are inconsistent.
    fn load(&self) -> Result<DataSplits>;
}

// ─── SampleSink ───────────────────────────────────────────────────────────────
/// Any component that can persist both dataset splits.
///
/// Implementations:
///   - NpzArchive → writes the four named arrays to data.npz,
///     overwriting a previous archive if one exists
pub trait SampleSink {
    /// Persist the train and test splits.
    /// Filesystem errors propagate to the caller.
    fn save(&self, splits: &DataSplits) -> Result<()>;
}
