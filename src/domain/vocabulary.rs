// ============================================================
// Layer 3 — Vocabulary Domain Type
// ============================================================
// The bidirectional mapping between token strings and integer
// IDs, built by an external preprocessing step and shipped in
// the info JSON as two parallel objects:
//
//   "ix_to_word": { "1": "a", "2": "<eos>", ... }
//   "word_to_ix": { "a": 1, "<eos>": 2, ... }
//
// ID 0 is reserved: it never maps to a real token and is used
// as the padding value in fixed-length label arrays. That
// reservation is what makes "trailing zeros" mean "padding"
// downstream.
//
// The <eos> marker is a real vocabulary token with a nonzero
// ID. It terminates every caption and is forced onto the last
// slot when a caption is truncated.
//
// Reference: Rust Book §8 (HashMaps)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The end-of-caption marker token, as written by the
/// upstream vocabulary builder.
pub const EOS_TOKEN: &str = "<eos>";

/// ID 0 is reserved as padding and never assigned to a token.
pub const PAD_ID: u32 = 0;

/// Fixed token <-> ID mapping, read-only after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    /// ID → token. Keys arrive as decimal strings in the JSON
    /// and are parsed to u32 by the info store at load time.
    ix_to_word: HashMap<u32, String>,

    /// Token → ID, the direction used when encoding captions
    word_to_ix: HashMap<String, u32>,
}

impl Vocabulary {
    pub fn new(ix_to_word: HashMap<u32, String>, word_to_ix: HashMap<String, u32>) -> Self {
        Self { ix_to_word, word_to_ix }
    }

    /// Number of distinct tokens in the vocabulary.
    pub fn size(&self) -> usize {
        self.ix_to_word.len()
    }

    /// Look up the integer ID for a token string.
    /// Returns None for tokens the vocabulary has never seen —
    /// callers decide whether that is an error.
    pub fn id_of(&self, token: &str) -> Option<u32> {
        self.word_to_ix.get(token).copied()
    }

    /// Look up the token string for an integer ID.
    /// ID 0 (padding) has no token and returns None.
    pub fn token_of(&self, id: u32) -> Option<&str> {
        self.ix_to_word.get(&id).map(String::as_str)
    }

    /// The ID of the <eos> end-of-caption marker.
    /// Returns None only for a malformed vocabulary that is
    /// missing the marker entirely.
    pub fn eos_id(&self) -> Option<u32> {
        self.id_of(EOS_TOKEN)
    }

    /// Decode a fixed-length label array back into words,
    /// stopping at the first padding zero. Used by the CLI to
    /// show a human-readable caption next to its IDs.
    pub fn decode(&self, label: &[u32]) -> Vec<String> {
        label
            .iter()
            .take_while(|&&id| id != PAD_ID)
            .map(|&id| {
                self.token_of(id)
                    .map(str::to_string)
                    // An ID outside the vocabulary should never come
                    // out of our own encoder, but render it visibly
                    // rather than panicking if a file is corrupt
                    .unwrap_or_else(|| format!("<unk:{id}>"))
            })
            .collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn small_vocab() -> Vocabulary {
        let ix_to_word: HashMap<u32, String> = [
            (1, "a".to_string()),
            (2, EOS_TOKEN.to_string()),
            (3, "cat".to_string()),
        ]
        .into_iter()
        .collect();
        let word_to_ix = ix_to_word
            .iter()
            .map(|(ix, w)| (w.clone(), *ix))
            .collect();
        Vocabulary::new(ix_to_word, word_to_ix)
    }

    #[test]
    fn test_round_trip_lookup() {
        let v = small_vocab();
        assert_eq!(v.id_of("cat"), Some(3));
        assert_eq!(v.token_of(3), Some("cat"));
        assert_eq!(v.size(), 3);
    }

    #[test]
    fn test_unknown_token_is_none() {
        let v = small_vocab();
        assert_eq!(v.id_of("dog"), None);
        // ID 0 is padding, never a token
        assert_eq!(v.token_of(PAD_ID), None);
    }

    #[test]
    fn test_eos_lookup() {
        let v = small_vocab();
        assert_eq!(v.eos_id(), Some(2));
    }

    #[test]
    fn test_decode_stops_at_padding() {
        let v = small_vocab();
        let words = v.decode(&[1, 3, 2, 0, 0]);
        assert_eq!(words, vec!["a", "cat", "<eos>"]);
    }
}
