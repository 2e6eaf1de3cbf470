// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (generating the dataset or previewing the
// batched stream).
//
// Rules for this layer:
//   - No sampling math or tensor code here
//   - No argument parsing here (that's Layer 1)
//   - No direct file format handling (that's Layer 4 and 5)
//   - Only workflow coordination
//
// Think of this layer as the "director" — it tells other
// layers what to do but doesn't do the work itself.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The dataset generation workflow
pub mod generate_use_case;

// The pipeline preview/consumption workflow
pub mod preview_use_case;
