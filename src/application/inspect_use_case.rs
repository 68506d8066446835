// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Answers "what does this dataset look like?" before any
// training run:
//
//   Step 1: Build a dataset per split     (Layer 4 - data)
//   Step 2: Report split sizes and vocab  (Layer 4 - data)
//   Step 3: Probe one example per split   (Layer 4 - data)
//           to report the feature shape
//
// The feature shape probe loads example 0 of each non-empty
// split, so it also doubles as a smoke test of the whole
// retrieval path: a bad feature directory or caption file
// shows up here instead of minutes into training.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::Result;
use std::fmt::Write;

use crate::data::dataset::{DataConfig, VideoDataset};
use crate::domain::split::Split;

/// Builds the datasets and formats a human-readable report.
/// Printing is left to the CLI layer.
pub struct InspectUseCase {
    config: DataConfig,
}

impl InspectUseCase {
    pub fn new(config: DataConfig) -> Self {
        Self { config }
    }

    /// Produce the corpus report as a string.
    pub fn execute(&self) -> Result<String> {
        let mut report = String::new();

        for (i, split) in Split::all().into_iter().enumerate() {
            let dataset = VideoDataset::new(&self.config, split)?;

            // Vocabulary and max_len are shared, report them once
            if i == 0 {
                writeln!(report, "vocab size:    {}", dataset.vocab_size())?;
                writeln!(report, "max seq len:   {}", dataset.seq_length())?;
            }

            write!(report, "{:<6} {:>6} videos", split.to_string(), dataset.sample_count())?;

            // Probe the first example to surface the feature shape
            // (and any broken file paths) without training anything
            if dataset.sample_count() > 0 {
                let example = dataset.get_example(0)?;
                let (time, dim) = example.fc_feats.dim();
                write!(
                    report,
                    "   first example: '{}' feats ({} x {}), {} captions",
                    example.video_id,
                    time,
                    dim,
                    example.gts.len()
                )?;
            }
            writeln!(report)?;
        }

        Ok(report)
    }
}
