// ============================================================
// Layer 4 — Video Caption Dataset
// ============================================================
// Implements Burn's Dataset trait: integer index in, one
// training example out.
//
// What one retrieval does (get_example):
//   1. Resolve index → video id via this split's manifest
//   2. Load the .npy feature matrix from every configured
//      directory, concatenated along the feature axis
//   3. Optionally fold in the time-averaged auxiliary features
//   4. Encode every caption for the video to a fixed-length
//      ID array (the ground truths, used by evaluation metrics)
//   5. Sample ONE caption uniformly as the training label and
//      build its length mask
//
// Randomness:
//   The caption sampler is seeded per instance and re-derived
//   per index, so retrieval is deterministic for a fixed seed
//   and needs no locking — the same index always yields the
//   same caption, and parallel workers never share RNG state.
//
// All JSON state (vocabulary, manifest, captions) is loaded
// once at construction and read-only afterwards. Feature files
// are re-read from disk on every call.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §10 (Trait Objects)

use anyhow::{bail, Context, Result};
use burn::data::dataset::Dataset;
use ndarray::Array2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::encoder::{encode_caption, length_mask, EncodedCaption};
use crate::data::features::{append_time_averaged, load_concatenated, NpyDirSource};
use crate::domain::split::{Split, SplitManifest};
use crate::domain::traits::FeatureSource;
use crate::domain::vocabulary::Vocabulary;
use crate::infra::caption_store::CaptionStore;
use crate::infra::info_store::DatasetInfo;

// ─── Data Configuration ───────────────────────────────────────────────────────
// Everything needed to locate and shape the dataset.
// Serialisable so a run's exact data configuration can be
// saved alongside checkpoints and reloaded for evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the caption JSON (video id → final_captions)
    pub caption_json:  String,

    /// Path to the info JSON (vocabulary + split manifest)
    pub info_json:     String,

    /// Feature directories, concatenated per video along the
    /// feature axis — at least one is required
    pub feats_dirs:    Vec<String>,

    /// Optional auxiliary feature directory (clip-level
    /// features, e.g. a motion CNN) — only read when with_aux
    pub aux_feats_dir: Option<String>,

    /// Whether to fold the auxiliary features into each example
    pub with_aux:      bool,

    /// Fixed width of label / mask / ground-truth arrays;
    /// longer captions are truncated to this many tokens
    pub max_len:       usize,

    /// Seed for the per-example caption sampler
    pub seed:          u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            caption_json:  "data/caption.json".to_string(),
            info_json:     "data/info.json".to_string(),
            feats_dirs:    vec!["data/feats/resnet152".to_string()],
            aux_feats_dir: None,
            with_aux:      false,
            max_len:       28,
            seed:          0,
        }
    }
}

// ─── CaptionExample ───────────────────────────────────────────────────────────
/// One training example: the unit the batcher stacks.
#[derive(Debug, Clone)]
pub struct CaptionExample {
    /// Per-video features — shape: (time_steps, feat_dim)
    pub fc_feats: Array2<f32>,

    /// The sampled training caption as token IDs,
    /// zero-padded to max_len
    pub label: Vec<u32>,

    /// 1.0 for each real token of `label`, 0.0 for padding
    pub mask: Vec<f32>,

    /// ALL captions for this video, each encoded to max_len —
    /// evaluation scores the model against every one of these
    pub gts: Vec<Vec<u32>>,

    /// The video identifier this example came from
    pub video_id: String,
}

// ─── VideoDataset ─────────────────────────────────────────────────────────────
/// An indexable, sized view over one split of the corpus.
pub struct VideoDataset {
    split:      Split,
    vocab:      Vocabulary,
    splits:     SplitManifest,
    captions:   CaptionStore,
    sources:    Vec<Box<dyn FeatureSource>>,
    aux_source: Option<Box<dyn FeatureSource>>,
    max_len:    usize,
    seed:       u64,
}

impl VideoDataset {
    /// Build the dataset for one split.
    ///
    /// Loads and validates both JSON files up front — a missing
    /// file, malformed JSON, or an empty feature-directory list
    /// fails here, never later inside a worker thread.
    pub fn new(config: &DataConfig, split: Split) -> Result<Self> {
        if config.feats_dirs.is_empty() {
            bail!("At least one feature directory must be configured");
        }
        if config.with_aux && config.aux_feats_dir.is_none() {
            bail!("with_aux is set but no auxiliary feature directory is configured");
        }

        let info = DatasetInfo::load(&config.info_json)?;
        let captions = CaptionStore::load(&config.caption_json)?;

        let sources: Vec<Box<dyn FeatureSource>> = config
            .feats_dirs
            .iter()
            .map(|dir| Box::new(NpyDirSource::new(dir)) as Box<dyn FeatureSource>)
            .collect();

        let aux_source = match (&config.aux_feats_dir, config.with_aux) {
            (Some(dir), true) => Some(Box::new(NpyDirSource::new(dir)) as Box<dyn FeatureSource>),
            _ => None,
        };

        tracing::info!(
            "Dataset ready: split '{}' with {} videos, {} feature dir(s), aux {}, max_len {}",
            split,
            info.splits.size(split),
            config.feats_dirs.len(),
            if aux_source.is_some() { "on" } else { "off" },
            config.max_len,
        );

        Ok(Self {
            split,
            vocab: info.vocab,
            splits: info.splits,
            captions,
            sources,
            aux_source,
            max_len: config.max_len,
            seed: config.seed,
        })
    }

    /// Number of videos (= valid indices) in this split.
    pub fn sample_count(&self) -> usize {
        self.splits.size(self.split)
    }

    /// The split this instance serves.
    pub fn split(&self) -> Split {
        self.split
    }

    /// The token <-> ID vocabulary, shared by encode and decode.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Number of distinct tokens — the model's output dimension.
    pub fn vocab_size(&self) -> usize {
        self.vocab.size()
    }

    /// Fixed width of label / mask / ground-truth arrays.
    pub fn seq_length(&self) -> usize {
        self.max_len
    }

    /// Fetch the example at `index`.
    ///
    /// Errors on: out-of-range index, missing/unreadable feature
    /// file, video absent from the caption store, or a caption
    /// token missing from the vocabulary.
    pub fn get_example(&self, index: usize) -> Result<CaptionExample> {
        // ── Step 1: index → video id ─────────────────────────────────────────
        let videos = self.splits.videos(self.split);
        let video_id = match videos.get(index) {
            Some(id) => id.as_str(),
            None => bail!(
                "Index {} out of range for split '{}' with {} videos",
                index,
                self.split,
                videos.len()
            ),
        };

        // ── Step 2: load + concatenate primary features ───────────────────────
        let mut fc_feats = load_concatenated(&self.sources, video_id)?;

        // ── Step 3: optional auxiliary features ──────────────────────────────
        if let Some(aux_source) = &self.aux_source {
            let aux = aux_source.load(video_id)?;
            fc_feats = append_time_averaged(&fc_feats, &aux)?;
        }

        // ── Step 4: encode every caption (the ground truths) ─────────────────
        let raw_captions = self.captions.captions_for(video_id)?;
        let mut encoded: Vec<EncodedCaption> = Vec::with_capacity(raw_captions.len());
        for tokens in raw_captions {
            let cap = encode_caption(&self.vocab, tokens, self.max_len)
                .with_context(|| format!("Cannot encode caption for video '{}'", video_id))?;
            encoded.push(cap);
        }

        // ── Step 5: sample one caption as the training label ─────────────────
        let cap_ix = self.example_rng(index).gen_range(0..encoded.len());
        let label = encoded[cap_ix].ids.clone();
        let mask = length_mask(encoded[cap_ix].len, self.max_len);

        let gts = encoded.into_iter().map(|c| c.ids).collect();

        Ok(CaptionExample {
            fc_feats,
            label,
            mask,
            gts,
            video_id: video_id.to_string(),
        })
    }

    /// RNG for one retrieval, derived from the instance seed and
    /// the index. The multiplier spreads consecutive indices far
    /// apart in seed space (splitmix64 constant).
    fn example_rng(&self, index: usize) -> StdRng {
        StdRng::seed_from_u64(self.seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

// ─── Burn Dataset Trait Implementation ────────────────────────────────────────
// This is what makes VideoDataset work with Burn's DataLoader.
// The trait contract maps failures to None, so errors are
// logged here before being swallowed — a silent None would be
// miserable to debug from inside a worker pool.
impl Dataset<CaptionExample> for VideoDataset {
    fn get(&self, index: usize) -> Option<CaptionExample> {
        match self.get_example(index) {
            Ok(example) => Some(example),
            Err(e) => {
                tracing::error!("Failed to load example {}: {:#}", index, e);
                None
            }
        }
    }

    fn len(&self) -> usize {
        self.sample_count()
    }
}
