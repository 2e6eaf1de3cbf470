// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from random sampling
// all the way to tensor batches ready for a training loop.
//
// The pipeline flows in this order:
//
//   Generator         → samples points, evaluates the target
//       │
//       ▼
//   NpzArchive        → persists / reloads the four arrays
//       │                (X_train, u_train, X_test, u_test)
//       ▼
//   PinnDataset       → implements Burn's Dataset trait
//       │
//       ▼
//   PinnBatcher       → stacks samples into f32 tensor batches
//       │
//       ▼
//   InputPipeline     → mode selection, shuffle, repeat,
//                       drop-remainder, ordered batching
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// The generator and the pipeline never talk to each other
// directly — the archive file on disk is the only hand-off.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Samples random points and labels them with the target function
pub mod generator;

/// Reads and writes the data.npz archive using ndarray-npy
pub mod archive;

/// Implements Burn's Dataset trait for labelled points
pub mod dataset;

/// Implements Burn's Batcher trait to create f32 tensor batches
pub mod batcher;

/// Builds the mode-aware batched stream over Burn's DataLoader
pub mod pipeline;
