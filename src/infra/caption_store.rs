// ============================================================
// Layer 5 — Caption Store
// ============================================================
// Loads the caption JSON produced by the upstream caption
// tokenisation step. The file maps every video id to an
// object holding its tokenised captions:
//
//   {
//     "video0": {
//       "final_captions": [
//         ["a", "man", "is", "singing", "<eos>"],
//         ["a", "person", "sings", "<eos>"]
//       ]
//     },
//     ...
//   }
//
// Each inner list is one human-authored caption, already
// tokenised and <eos>-terminated upstream. The store is
// read-only after load; captions are looked up per video id
// during retrieval.
//
// Reference: Rust Book §8 (HashMaps)
//            Rust Book §9 (Error Handling with anyhow)

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// The per-video object inside the caption JSON.
/// Only "final_captions" is read; any extra bookkeeping fields
/// written by the preprocessor are ignored by serde.
#[derive(Debug, Clone, Deserialize)]
struct VideoCaptions {
    final_captions: Vec<Vec<String>>,
}

/// All tokenised captions for the corpus, keyed by video id.
pub struct CaptionStore {
    captions: HashMap<String, VideoCaptions>,
}

impl CaptionStore {
    /// Read and parse the caption JSON at `path`.
    /// Missing or malformed file is fatal — captions are
    /// required for every split, including test.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Cannot read caption file '{}'", path.display()))?;

        let captions: HashMap<String, VideoCaptions> = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed caption JSON in '{}'", path.display()))?;

        tracing::info!(
            "Loaded captions for {} videos from '{}'",
            captions.len(),
            path.display()
        );

        Ok(Self { captions })
    }

    /// All tokenised captions for one video.
    ///
    /// Errors if the video id is absent or its caption list is
    /// empty — both would make caption sampling impossible, so
    /// they are surfaced here with the offending id rather than
    /// as a panic inside the sampler.
    pub fn captions_for(&self, video_id: &str) -> Result<&[Vec<String>]> {
        let entry = match self.captions.get(video_id) {
            Some(entry) => entry,
            None => bail!("No captions found for video '{}'", video_id),
        };
        if entry.final_captions.is_empty() {
            bail!("Empty caption list for video '{}'", video_id);
        }
        Ok(&entry.final_captions)
    }

    /// Number of videos with at least one caption entry.
    pub fn video_count(&self) -> usize {
        self.captions.len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn store_from(json: &str) -> CaptionStore {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", json).unwrap();
        CaptionStore::load(file.path()).unwrap()
    }

    #[test]
    fn test_loads_and_looks_up_captions() {
        let store = store_from(
            r#"{
                "v1": {"final_captions": [["a", "cat", "<eos>"], ["the", "cat", "<eos>"]]},
                "v2": {"final_captions": [["a", "dog", "<eos>"]]}
            }"#,
        );

        assert_eq!(store.video_count(), 2);
        let caps = store.captions_for("v1").unwrap();
        assert_eq!(caps.len(), 2);
        assert_eq!(caps[0], vec!["a", "cat", "<eos>"]);
    }

    #[test]
    fn test_ignores_extra_fields() {
        // Preprocessors often keep the raw sentences alongside —
        // those extra fields must not break deserialisation
        let store = store_from(
            r#"{"v1": {"final_captions": [["hi", "<eos>"]], "captions": ["hi"]}}"#,
        );
        assert!(store.captions_for("v1").is_ok());
    }

    #[test]
    fn test_unknown_video_is_error() {
        let store = store_from(r#"{"v1": {"final_captions": [["hi", "<eos>"]]}}"#);
        let err = store.captions_for("v999").unwrap_err();
        assert!(err.to_string().contains("v999"));
    }

    #[test]
    fn test_empty_caption_list_is_error() {
        let store = store_from(r#"{"v1": {"final_captions": []}}"#);
        let err = store.captions_for("v1").unwrap_err();
        assert!(err.to_string().contains("Empty caption list"));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(CaptionStore::load("/nonexistent/captions.json").is_err());
    }
}
