// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `stats` and `sample`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, Split, etc.)
//
// Both commands describe the same dataset, so the data flags
// live in one DataArgs struct that each command flattens in.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::data::dataset::DataConfig;
use crate::domain::split::Split;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report split sizes, vocabulary size, and feature shapes
    Stats(StatsArgs),

    /// Fetch a few examples and collate them into one batch
    Sample(SampleArgs),
}

/// Flags that locate and shape the dataset — shared by every
/// command. Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct DataArgs {
    /// Path to the caption JSON (video id -> final_captions)
    #[arg(long, default_value = "data/caption.json")]
    pub caption_json: String,

    /// Path to the info JSON (vocabulary + split manifest)
    #[arg(long, default_value = "data/info.json")]
    pub info_json: String,

    /// Feature directory with one <video_id>.npy per video.
    /// Repeat the flag to concatenate several feature sources
    #[arg(long = "feats-dir", default_value = "data/feats/resnet152")]
    pub feats_dirs: Vec<String>,

    /// Optional auxiliary feature directory (time-averaged and
    /// tiled onto the primary features when --with-aux is set)
    #[arg(long)]
    pub aux_feats_dir: Option<String>,

    /// Fold the auxiliary features into every example
    #[arg(long, default_value_t = false)]
    pub with_aux: bool,

    /// Fixed caption width — longer captions are truncated with
    /// a forced trailing <eos>
    #[arg(long, default_value_t = 28)]
    pub max_len: usize,

    /// Seed for the per-example caption sampler
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

/// Convert CLI DataArgs into the application-layer DataConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<DataArgs> for DataConfig {
    fn from(a: DataArgs) -> Self {
        DataConfig {
            caption_json:  a.caption_json,
            info_json:     a.info_json,
            feats_dirs:    a.feats_dirs,
            aux_feats_dir: a.aux_feats_dir,
            with_aux:      a.with_aux,
            max_len:       a.max_len,
            seed:          a.seed,
        }
    }
}

/// All arguments for the `stats` command
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub data: DataArgs,
}

/// All arguments for the `sample` command
#[derive(Args, Debug)]
pub struct SampleArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Which split to fetch from: train, val, or test
    #[arg(long, default_value = "train")]
    pub split: Split,

    /// Index of the first example to fetch
    #[arg(long, default_value_t = 0)]
    pub index: usize,

    /// Number of consecutive examples to collate into the batch
    #[arg(long, default_value_t = 2)]
    pub count: usize,
}
