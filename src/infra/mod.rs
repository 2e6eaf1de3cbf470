// ============================================================
// Layer 5 — Infrastructure Layer
// ============================================================
// Handles cross-cutting concerns that don't belong in any
// specific business layer:
//
//   manifest.rs — Generation config persistence
//                 Saves the GenerateConfig as JSON next to
//                 the archive so later runs can report how
//                 the data was produced.
//
//   report.rs   — Batch statistics logging
//                 Writes per-batch label statistics from a
//                 preview run to a CSV file for quick
//                 eyeballing and plotting.
//
// Why is this a separate layer?
//   These concerns are used by multiple use cases but don't
//   belong to any one of them. Keeping them here:
//   - Prevents duplication across layers
//   - Makes it easy to swap implementations
//   - Keeps other layers focused on their core logic
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Generation config save/load as JSON
pub mod manifest;

/// Per-batch statistics CSV logger
pub mod report;
