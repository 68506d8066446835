// ============================================================
// Layer 5 — Info Store
// ============================================================
// Loads the dataset info JSON produced by the upstream
// vocabulary-building step. The file looks like:
//
//   {
//     "ix_to_word": { "1": "a", "2": "<eos>", ... },
//     "word_to_ix": { "a": 1, "<eos>": 2, ... },
//     "videos": {
//       "train": ["video0", "video1", ...],
//       "val":   ["video6513", ...],
//       "test":  ["video7010", ...]
//     }
//   }
//
// Note the ix_to_word keys: JSON object keys are always
// strings, so the integer IDs arrive as "1", "2", ... and are
// parsed to u32 here. A non-numeric key means the file was
// not produced by the expected pipeline and is a hard error.
//
// A missing or malformed file is fatal at dataset
// construction — there is no sensible degraded mode without
// a vocabulary.
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json crate documentation

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::domain::split::SplitManifest;
use crate::domain::vocabulary::Vocabulary;

/// The raw serde shape of the info JSON file.
/// Field names must match the file format exactly.
#[derive(Debug, Deserialize)]
struct InfoFile {
    /// ID → token, keys as decimal strings
    ix_to_word: HashMap<String, String>,

    /// Token → ID
    word_to_ix: HashMap<String, u32>,

    /// Ordered video-id lists keyed by split name
    videos: SplitManifest,
}

/// The validated contents of the info JSON.
#[derive(Debug)]
pub struct DatasetInfo {
    pub vocab: Vocabulary,
    pub splits: SplitManifest,
}

impl DatasetInfo {
    /// Read and validate the info JSON at `path`.
    ///
    /// Steps:
    ///   1. Read the file (missing file → error naming the path)
    ///   2. Deserialise with serde (wrong shape → error)
    ///   3. Parse the stringly-typed ix_to_word keys to u32
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Cannot read info file '{}'", path.display()))?;

        let info: InfoFile = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed info JSON in '{}'", path.display()))?;

        // Parse "1" → 1u32 for every ix_to_word key
        let mut ix_to_word = HashMap::with_capacity(info.ix_to_word.len());
        for (key, word) in info.ix_to_word {
            let ix: u32 = key.parse().with_context(|| {
                format!(
                    "Non-numeric vocabulary index '{}' in '{}'",
                    key,
                    path.display()
                )
            })?;
            ix_to_word.insert(ix, word);
        }

        let vocab = Vocabulary::new(ix_to_word, info.word_to_ix);

        tracing::info!(
            "Loaded info file '{}': vocab size {}, {} train / {} val / {} test videos",
            path.display(),
            vocab.size(),
            info.videos.train.len(),
            info.videos.val.len(),
            info.videos.test.len(),
        );

        Ok(Self {
            vocab,
            splits: info.videos,
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::split::Split;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_info(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", json).unwrap();
        file
    }

    #[test]
    fn test_loads_valid_info_file() {
        let file = write_info(
            r#"{
                "ix_to_word": {"1": "a", "2": "<eos>"},
                "word_to_ix": {"a": 1, "<eos>": 2},
                "videos": {"train": ["v1", "v2"], "val": ["v3"], "test": []}
            }"#,
        );

        let info = DatasetInfo::load(file.path()).unwrap();
        assert_eq!(info.vocab.size(), 2);
        assert_eq!(info.vocab.id_of("a"), Some(1));
        assert_eq!(info.vocab.token_of(2), Some("<eos>"));
        assert_eq!(info.splits.size(Split::Train), 2);
        assert_eq!(info.splits.videos(Split::Val), ["v3"]);
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = DatasetInfo::load("/nonexistent/info.json").unwrap_err();
        assert!(err.to_string().contains("Cannot read info file"));
    }

    #[test]
    fn test_malformed_json_is_error() {
        let file = write_info("{ not json ");
        let err = DatasetInfo::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Malformed info JSON"));
    }

    #[test]
    fn test_non_numeric_vocab_index_is_error() {
        let file = write_info(
            r#"{
                "ix_to_word": {"one": "a"},
                "word_to_ix": {"a": 1},
                "videos": {"train": [], "val": [], "test": []}
            }"#,
        );
        let err = DatasetInfo::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Non-numeric vocabulary index"));
    }
}
