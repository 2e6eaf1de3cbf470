// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `generate` and `preview`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// The defaults mirror the reference dataset: a 3-D domain,
// 2^20 training points, 2^10 test points, archive directory
// `pinndata`.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use crate::application::generate_use_case::GenerateConfig;
use crate::application::preview_use_case::PreviewConfig;
use crate::data::pipeline::Mode;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sample the synthetic dataset and write the data.npz archive
    Generate(GenerateArgs),

    /// Build the input pipeline and consume a few batches
    Preview(PreviewArgs),
}

/// All arguments for the `generate` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Spatial dimensionality of the sampled points (2 or 3).
    /// Selects which trigonometric target function labels the data
    #[arg(long, default_value_t = 3)]
    pub dim: usize,

    /// Number of training points to sample (2^20 by default)
    #[arg(long, default_value_t = 1_048_576)]
    pub train_size: usize,

    /// Number of test points to sample (2^10 by default)
    #[arg(long, default_value_t = 1024)]
    pub test_size: usize,

    /// Directory to write data.npz and generate_config.json into.
    /// Created if it does not exist
    #[arg(long, default_value = "pinndata")]
    pub data_dir: String,
}

/// Convert CLI GenerateArgs into the application-layer GenerateConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<GenerateArgs> for GenerateConfig {
    fn from(a: GenerateArgs) -> Self {
        GenerateConfig {
            dim:        a.dim,
            train_size: a.train_size,
            test_size:  a.test_size,
            data_dir:   a.data_dir,
        }
    }
}

/// Which split the preview pipeline should serve.
/// Mapped onto the pipeline's Mode so the data layer
/// never sees clap types either.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    /// Train split: shuffled (unless --no-shuffle) and repeated forever
    Train,
    /// Test split: in order, single pass, finite
    Eval,
}

impl From<ModeArg> for Mode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Train => Mode::Train,
            ModeArg::Eval  => Mode::Eval,
        }
    }
}

/// All arguments for the `preview` command
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Directory holding the data.npz archive (same as used by generate)
    #[arg(long, default_value = "pinndata")]
    pub data_dir: String,

    /// Which split to stream: train (infinite) or eval (finite)
    #[arg(long, value_enum, default_value = "train")]
    pub mode: ModeArg,

    /// Number of samples per batch — the fallback used when no
    /// mode-specific override is given
    #[arg(long, default_value_t = 256)]
    pub batch_size: usize,

    /// Batch size override for train mode (falls back to --batch-size)
    #[arg(long)]
    pub train_batch_size: Option<usize>,

    /// Batch size override for eval mode (falls back to --batch-size)
    #[arg(long)]
    pub eval_batch_size: Option<usize>,

    /// Disable the full-dataset shuffle in train mode.
    /// Eval mode never shuffles
    #[arg(long)]
    pub no_shuffle: bool,

    /// Advisory parallelism hint for batch preparation; batching
    /// runs on a single ordered worker either way
    #[arg(long, default_value_t = 0)]
    pub num_parallel_calls: usize,

    /// How many batches to pull from an infinite train stream
    /// before stopping (eval mode always drains to the end)
    #[arg(long, default_value_t = 8)]
    pub batches: usize,
}

/// Convert CLI PreviewArgs into the application-layer PreviewConfig
impl From<PreviewArgs> for PreviewConfig {
    fn from(a: PreviewArgs) -> Self {
        PreviewConfig {
            data_dir:           a.data_dir,
            mode:               a.mode.into(),
            batch_size:         a.batch_size,
            train_batch_size:   a.train_batch_size,
            eval_batch_size:    a.eval_batch_size,
            shuffle:            !a.no_shuffle,
            num_parallel_calls: a.num_parallel_calls,
            max_batches:        a.batches,
        }
    }
}
