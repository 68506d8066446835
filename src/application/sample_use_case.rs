// ============================================================
// Layer 2 — SampleUseCase
// ============================================================
// Fetches a handful of consecutive examples and runs them
// through the batcher, exactly as a training loop would:
//
//   Step 1: Build the dataset for the split  (Layer 4 - data)
//   Step 2: Fetch examples index..index+n    (Layer 4 - data)
//   Step 3: Collate them into one batch      (Layer 4 - data)
//   Step 4: Report tensor shapes and decode
//           each sampled caption back to words
//
// Runs on the NdArray (CPU) backend — this is an inspection
// path, the tensors never reach a model.
//
// Reference: Burn Book §4 (Batcher)

use anyhow::{Context, Result};
use burn::data::dataloader::batcher::Batcher;
use std::fmt::Write;

use crate::data::batcher::CaptionBatcher;
use crate::data::dataset::{CaptionExample, DataConfig, VideoDataset};
use crate::domain::split::Split;

// Inspection always runs on CPU
type SampleBackend = burn::backend::NdArray;

pub struct SampleUseCase {
    config: DataConfig,
    split:  Split,
    index:  usize,
    count:  usize,
}

impl SampleUseCase {
    pub fn new(config: DataConfig, split: Split, index: usize, count: usize) -> Self {
        Self { config, split, index, count }
    }

    /// Fetch, collate, and format the batch report.
    pub fn execute(&self) -> Result<String> {
        let dataset = VideoDataset::new(&self.config, self.split)?;

        // ── Fetch the requested examples ─────────────────────────────────────
        let mut examples: Vec<CaptionExample> = Vec::with_capacity(self.count);
        for ix in self.index..self.index + self.count {
            let example = dataset
                .get_example(ix)
                .with_context(|| format!("Cannot fetch example {} from '{}'", ix, self.split))?;
            examples.push(example);
        }

        // ── Decode labels before the batcher consumes the Vec ─────────────────
        let mut report = String::new();
        for example in &examples {
            let words = dataset.vocab().decode(&example.label);
            writeln!(
                report,
                "{}: ({} x {}) \"{}\"",
                example.video_id,
                example.fc_feats.nrows(),
                example.fc_feats.ncols(),
                words.join(" ")
            )?;
        }

        // ── Collate, exactly as the DataLoader would ──────────────────────────
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let batch = CaptionBatcher::<SampleBackend>::new(device).batch(examples);

        writeln!(report, "fc_feats:  {:?}", batch.fc_feats.dims())?;
        writeln!(report, "labels:    {:?}", batch.labels.dims())?;
        writeln!(report, "masks:     {:?}", batch.masks.dims())?;
        writeln!(report, "gts:       {:?}", batch.gts.dims())?;
        writeln!(report, "video_ids: {:?}", batch.video_ids)?;

        Ok(report)
    }
}
