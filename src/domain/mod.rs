// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// This is the heart of the application — pure Rust structs
// and traits that define the core concepts of the system.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain structs, enums, traits, and ndarray containers
//
// Why keep this layer pure?
//   - Easy to unit test (no tensor backend needed)
//   - Easy to understand (no framework noise)
//   - Easy to swap implementations (just implement the trait)
//
// Think of this layer as the "dictionary" of the system —
// it defines what things ARE, not how they work.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// The closed-form target function and its dimensionality selector
pub mod target;

// Sample, sample-set, and split container types
pub mod sample;

// Core abstractions (traits) that other layers implement
pub mod traits;
