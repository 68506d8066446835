// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `stats`  — reports split sizes, vocab, feature shapes
//   2. `sample` — fetches examples and collates one batch
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, SampleArgs, StatsArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "video-caption-data",
    version = "0.1.0",
    about = "Inspect and batch precomputed video-captioning data (.npy features + tokenized captions)."
)]
pub struct Cli {
    /// The subcommand to run (stats or sample)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Stats(args)  => Self::run_stats(args),
            Commands::Sample(args) => Self::run_sample(args),
        }
    }

    /// Handles the `stats` subcommand.
    fn run_stats(args: StatsArgs) -> Result<()> {
        use crate::application::inspect_use_case::InspectUseCase;

        tracing::info!("Inspecting dataset described by '{}'", args.data.info_json);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = InspectUseCase::new(args.data.into());
        print!("{}", use_case.execute()?);
        Ok(())
    }

    /// Handles the `sample` subcommand.
    fn run_sample(args: SampleArgs) -> Result<()> {
        use crate::application::sample_use_case::SampleUseCase;

        tracing::info!(
            "Sampling {} example(s) from '{}' starting at index {}",
            args.count,
            args.split,
            args.index
        );

        let use_case = SampleUseCase::new(args.data.into(), args.split, args.index, args.count);
        print!("{}", use_case.execute()?);
        Ok(())
    }
}
