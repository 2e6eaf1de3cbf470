// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `generate` — samples the synthetic dataset and writes
//                   the data.npz archive
//   2. `preview`  — builds the batched input pipeline and
//                   consumes a few batches to sanity-check it
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, GenerateArgs, PreviewArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "pinn-data",
    version = "0.1.0",
    about = "Generate a synthetic PINN regression dataset, then stream it in batches."
)]
pub struct Cli {
    /// The subcommand to run (generate or preview)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    /// The match moves the args out of the Cli, so the handlers take
    /// only the args they need.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Generate(args) => Self::run_generate(args),
            Commands::Preview(args)  => Self::run_preview(args),
        }
    }

    /// Handles the `generate` subcommand.
    /// Converts CLI args into a GenerateConfig and hands off to Layer 2.
    fn run_generate(args: GenerateArgs) -> Result<()> {
        use crate::application::generate_use_case::GenerateUseCase;

        tracing::info!("Generating synthetic dataset into: {}", args.data_dir);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = GenerateUseCase::new(args.into());
        use_case.execute()?;

        println!("Dataset written. Archive saved as data.npz.");
        Ok(())
    }

    /// Handles the `preview` subcommand.
    /// Builds the input pipeline in the requested mode and drains batches.
    fn run_preview(args: PreviewArgs) -> Result<()> {
        use crate::application::preview_use_case::PreviewUseCase;

        let use_case = PreviewUseCase::new(args.into());
        let consumed = use_case.execute()?;

        println!("\nPreview complete. Consumed {} batches.", consumed);
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_generate_dispatch_runs_end_to_end() {
        let dir  = tempdir().unwrap();
        let path = dir.path().to_string_lossy().into_owned();

        // Parse a real argv and run it through the dispatcher
        let cli = Cli::try_parse_from([
            "pinn-data", "generate",
            "--dim", "2",
            "--train-size", "8",
            "--test-size", "4",
            "--data-dir", &path,
        ])
        .unwrap();
        cli.run().unwrap();

        assert!(dir.path().join("data.npz").exists());
    }

    #[test]
    fn test_preview_dispatch_runs_end_to_end() {
        let dir  = tempdir().unwrap();
        let path = dir.path().to_string_lossy().into_owned();

        Cli::try_parse_from([
            "pinn-data", "generate",
            "--dim", "2",
            "--train-size", "8",
            "--test-size", "8",
            "--data-dir", &path,
        ])
        .unwrap()
        .run()
        .unwrap();

        Cli::try_parse_from([
            "pinn-data", "preview",
            "--data-dir", &path,
            "--mode", "eval",
            "--batch-size", "4",
        ])
        .unwrap()
        .run()
        .unwrap();
    }
}
