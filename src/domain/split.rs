// ============================================================
// Layer 3 — Split and SplitManifest Domain Types
// ============================================================
// A video corpus is partitioned into three disjoint splits:
//   - train: used to update model weights
//   - val:   used to measure generalisation during training
//   - test:  held out entirely until final evaluation
//
// The manifest (loaded from the info JSON's "videos" object)
// records which video identifiers belong to which split.
// The order of the lists matters: an integer dataset index
// resolves to a video id by position within its split's list.
//
// Why an enum instead of a raw string?
//   A raw string like "trian" would only fail deep inside
//   retrieval, long after construction. Parsing into an enum
//   up front means an unrecognised split name is rejected
//   immediately, with a clear error message.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─── Split ────────────────────────────────────────────────────────────────────
/// One of the three disjoint partitions of the video corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Split {
    Train,
    Val,
    Test,
}

impl Split {
    /// The canonical lowercase name, matching the info JSON keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val   => "val",
            Split::Test  => "test",
        }
    }

    /// All three splits in conventional order — handy for
    /// iterating when reporting corpus statistics.
    pub fn all() -> [Split; 3] {
        [Split::Train, Split::Val, Split::Test]
    }
}

/// Parse a split name from the command line or a config file.
/// Only the exact names "train", "val" and "test" are accepted.
impl FromStr for Split {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Split::Train),
            "val"   => Ok(Split::Val),
            "test"  => Ok(Split::Test),
            other   => bail!(
                "Unrecognised split '{}': expected one of 'train', 'val', 'test'",
                other
            ),
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── SplitManifest ────────────────────────────────────────────────────────────
/// The ordered video-id lists for all three splits.
///
/// Deserialised directly from the "videos" object of the info
/// JSON, so the field names must match the file format exactly.
/// Immutable after load — the index space of each split is fixed
/// for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitManifest {
    /// Video ids belonging to the training split, in index order
    pub train: Vec<String>,

    /// Video ids belonging to the validation split, in index order
    pub val: Vec<String>,

    /// Video ids belonging to the test split, in index order
    pub test: Vec<String>,
}

impl SplitManifest {
    /// The ordered video-id list for one split.
    pub fn videos(&self, split: Split) -> &[String] {
        match split {
            Split::Train => &self.train,
            Split::Val   => &self.val,
            Split::Test  => &self.test,
        }
    }

    /// Number of videos in one split — this defines the valid
    /// index range [0, size) for that split's dataset.
    pub fn size(&self, split: Split) -> usize {
        self.videos(split).len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_valid_split_names() {
        assert_eq!("train".parse::<Split>().unwrap(), Split::Train);
        assert_eq!("val".parse::<Split>().unwrap(), Split::Val);
        assert_eq!("test".parse::<Split>().unwrap(), Split::Test);
    }

    #[test]
    fn test_rejects_unknown_split_name() {
        // Typos must fail at parse time, not deep inside retrieval
        assert!("trian".parse::<Split>().is_err());
        assert!("TRAIN".parse::<Split>().is_err());
        assert!("".parse::<Split>().is_err());
    }

    #[test]
    fn test_manifest_lookup_preserves_order() {
        let manifest = SplitManifest {
            train: vec!["v1".into(), "v2".into()],
            val:   vec!["v3".into()],
            test:  vec![],
        };
        assert_eq!(manifest.videos(Split::Train), ["v1", "v2"]);
        assert_eq!(manifest.size(Split::Train), 2);
        assert_eq!(manifest.size(Split::Val), 1);
        assert_eq!(manifest.size(Split::Test), 0);
    }
}
