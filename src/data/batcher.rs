// ============================================================
// Layer 4 — Caption Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a
// Vec<CaptionExample> into GPU-ready tensors.
//
// What is a Batcher?
//   A Batcher takes a list of individual examples and stacks
//   them into a single batch tensor. This is necessary because
//   GPUs are most efficient when processing many samples at once.
//
// What needs padding here:
//   - fc_feats: videos have DIFFERENT time-step counts, so
//     every feature matrix is right-padded with zero rows to
//     the longest video in the batch → [N, max_T, feat_dim]
//   - gts: videos have DIFFERENT caption counts, so the
//     caption axis is padded with all-zero rows to the batch
//     maximum → [N, max_caps, max_len]. A zero row cannot be
//     a real caption (every real caption starts with a
//     nonzero token ID), so evaluation can skip them.
//   - labels / masks are already fixed at max_len, so they
//     stack directly → [N, max_len]
//
// Flattening pattern:
//   [e1_t1, e1_t2, ..., e2_t1, ...] → reshape to [N, ...],
//   exactly like stacking pre-padded rows.
//
// Reference: Burn Book §4 (Batcher)
//            Rust Book §8 (Vectors)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::CaptionExample;

// ─── CaptionBatch ─────────────────────────────────────────────────────────────
/// A batch of caption examples ready for the model forward pass.
/// All tensors have batch_size as their first dimension.
///
/// B is the Burn Backend (e.g. Wgpu, NdArray) —
/// generic so the same batcher works on any device.
#[derive(Debug, Clone)]
pub struct CaptionBatch<B: Backend> {
    /// Video features — shape: [batch_size, max_time, feat_dim]
    /// Rows past a video's own length are zero padding
    pub fc_feats: Tensor<B, 3>,

    /// Sampled training captions — shape: [batch_size, max_len]
    pub labels: Tensor<B, 2, Int>,

    /// Label masks — shape: [batch_size, max_len]
    /// 1.0 = real token, 0.0 = padding
    pub masks: Tensor<B, 2>,

    /// All ground-truth captions — shape:
    /// [batch_size, max_caps, max_len], zero rows where an
    /// example has fewer captions than the batch maximum
    pub gts: Tensor<B, 3, Int>,

    /// Video identifiers in input order — not numeric, so they
    /// stay a plain Vec instead of a tensor
    pub video_ids: Vec<String>,
}

// ─── CaptionBatcher ───────────────────────────────────────────────────────────
/// The batcher struct — holds the target device so tensors
/// are created on the correct GPU/CPU.
#[derive(Clone, Debug)]
pub struct CaptionBatcher<B: Backend> {
    /// The device to create tensors on (e.g. GPU index 0)
    pub device: B::Device,
}

impl<B: Backend> CaptionBatcher<B> {
    /// Create a new batcher for the given device
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

// ─── Burn Batcher Trait Implementation ────────────────────────────────────────
// This is what makes CaptionBatcher work with Burn's DataLoader.
// The DataLoader calls .batch(items) with each mini-batch of examples.
impl<B: Backend> Batcher<CaptionExample, CaptionBatch<B>> for CaptionBatcher<B> {
    /// Convert a Vec of CaptionExamples into a single CaptionBatch.
    ///
    /// Steps:
    ///   1. Find the batch maxima (time steps, caption count)
    ///   2. Flatten fc_feats with zero padding, reshape to 3-D
    ///   3. Flatten labels and masks, reshape to 2-D
    ///   4. Flatten gts with zero-row padding, reshape to 3-D
    ///   5. Collect video ids in order
    fn batch(&self, items: Vec<CaptionExample>) -> CaptionBatch<B> {
        let batch_size = items.len();
        // All label arrays share the configured fixed width
        let max_len  = items[0].label.len();
        let feat_dim = items[0].fc_feats.ncols();

        let max_time = items.iter().map(|e| e.fc_feats.nrows()).max().unwrap_or(0);
        let max_caps = items.iter().map(|e| e.gts.len()).max().unwrap_or(0);

        // ── Flatten fc_feats with zero padding ────────────────────────────────
        // Start from an all-zero buffer and copy each example's
        // real rows in — whatever is not overwritten IS the padding
        let mut feats_flat = vec![0.0f32; batch_size * max_time * feat_dim];
        for (i, example) in items.iter().enumerate() {
            for (t, row) in example.fc_feats.rows().into_iter().enumerate() {
                let base = (i * max_time + t) * feat_dim;
                for (d, &value) in row.iter().enumerate() {
                    feats_flat[base + d] = value;
                }
            }
        }

        // ── Flatten labels ────────────────────────────────────────────────────
        // Vec<Vec<u32>> to Vec<i32> (Burn uses i32 for Int tensors)
        let labels_flat: Vec<i32> = items
            .iter()
            .flat_map(|e| e.label.iter().map(|&x| x as i32))
            .collect();

        // ── Flatten masks ─────────────────────────────────────────────────────
        let masks_flat: Vec<f32> = items
            .iter()
            .flat_map(|e| e.mask.iter().copied())
            .collect();

        // ── Flatten gts, padding the caption axis ─────────────────────────────
        let mut gts_flat: Vec<i32> = Vec::with_capacity(batch_size * max_caps * max_len);
        for example in &items {
            for caption in &example.gts {
                gts_flat.extend(caption.iter().map(|&x| x as i32));
            }
            // All-zero rows up to the batch's caption-count maximum
            let missing = max_caps - example.gts.len();
            gts_flat.extend(std::iter::repeat(0).take(missing * max_len));
        }

        // ── Collect video ids ─────────────────────────────────────────────────
        let video_ids: Vec<String> = items.iter().map(|e| e.video_id.clone()).collect();

        // ── Create tensors ────────────────────────────────────────────────────
        // Tensor::from_floats / from_ints create a 1D tensor from
        // a slice, then .reshape() gives the final shape

        let fc_feats = Tensor::<B, 1>::from_floats(
            feats_flat.as_slice(), &self.device
        ).reshape([batch_size, max_time, feat_dim]);

        let labels = Tensor::<B, 1, Int>::from_ints(
            labels_flat.as_slice(), &self.device
        ).reshape([batch_size, max_len]);

        let masks = Tensor::<B, 1>::from_floats(
            masks_flat.as_slice(), &self.device
        ).reshape([batch_size, max_len]);

        let gts = Tensor::<B, 1, Int>::from_ints(
            gts_flat.as_slice(), &self.device
        ).reshape([batch_size, max_caps, max_len]);

        CaptionBatch {
            fc_feats,
            labels,
            masks,
            gts,
            video_ids,
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::ndarray::NdArrayDevice;
    use burn::backend::NdArray;
    use ndarray::Array2;

    type B = NdArray;

    /// One example with `time` feature rows filled with `fill`,
    /// a 3-token label, and `caps` identical ground truths.
    fn example(id: &str, time: usize, fill: f32, caps: usize) -> CaptionExample {
        let ids = vec![3u32, 4, 2, 0, 0];
        CaptionExample {
            fc_feats: Array2::from_elem((time, 4), fill),
            label: ids.clone(),
            mask: vec![1.0, 1.0, 1.0, 0.0, 0.0],
            gts: vec![ids; caps],
            video_id: id.to_string(),
        }
    }

    fn batcher() -> CaptionBatcher<B> {
        CaptionBatcher::new(NdArrayDevice::default())
    }

    #[test]
    fn test_batch_shapes() {
        let batch = batcher().batch(vec![
            example("v1", 8, 1.0, 2),
            example("v2", 12, 2.0, 2),
        ]);

        // Feature time axis padded to the longest video (12)
        assert_eq!(batch.fc_feats.dims(), [2, 12, 4]);
        assert_eq!(batch.labels.dims(), [2, 5]);
        assert_eq!(batch.masks.dims(), [2, 5]);
        assert_eq!(batch.gts.dims(), [2, 2, 5]);
        assert_eq!(batch.video_ids, vec!["v1", "v2"]);
    }

    #[test]
    fn test_feature_padding_rows_are_zero() {
        let batch = batcher().batch(vec![
            example("v1", 8, 1.0, 1),
            example("v2", 12, 2.0, 1),
        ]);

        let values = batch.fc_feats.into_data().to_vec::<f32>().unwrap();
        // Layout is [example, time, dim] row-major
        let at = |i: usize, t: usize, d: usize| values[(i * 12 + t) * 4 + d];

        // v1's real rows carry its fill value...
        assert_eq!(at(0, 7, 0), 1.0);
        // ...and rows 8..12 are zero padding
        for t in 8..12 {
            for d in 0..4 {
                assert_eq!(at(0, t, d), 0.0, "expected zero pad at t={t} d={d}");
            }
        }
        // v2 has no padding rows
        assert_eq!(at(1, 11, 3), 2.0);
    }

    #[test]
    fn test_labels_and_masks_stack_in_order() {
        let batch = batcher().batch(vec![
            example("v1", 4, 1.0, 1),
            example("v2", 4, 2.0, 1),
        ]);

        // NdArray's Int element type is i64
        let labels = batch.labels.into_data().to_vec::<i64>().unwrap();
        assert_eq!(labels, vec![3, 4, 2, 0, 0, 3, 4, 2, 0, 0]);

        let masks = batch.masks.into_data().to_vec::<f32>().unwrap();
        assert_eq!(masks[..5], [1.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_uneven_caption_counts_are_padded_with_zero_rows() {
        let batch = batcher().batch(vec![
            example("v1", 4, 1.0, 2),
            example("v2", 4, 2.0, 3),
        ]);

        assert_eq!(batch.gts.dims(), [2, 3, 5]);

        let gts = batch.gts.into_data().to_vec::<i64>().unwrap();
        // v1's third caption row is padding — all zeros
        let v1_third_row = &gts[2 * 5..3 * 5];
        assert_eq!(v1_third_row, [0, 0, 0, 0, 0]);
        // v2's third row is a real caption
        let v2_third_row = &gts[(3 + 2) * 5..(3 + 3) * 5];
        assert_eq!(v2_third_row, [3, 4, 2, 0, 0]);
    }

    #[test]
    fn test_single_example_batch() {
        let batch = batcher().batch(vec![example("v1", 6, 1.5, 1)]);
        assert_eq!(batch.fc_feats.dims(), [1, 6, 4]);
        assert_eq!(batch.gts.dims(), [1, 1, 5]);
        assert_eq!(batch.video_ids, vec!["v1"]);
    }
}
