// ============================================================
// Layer 4 — Caption Encoder
// ============================================================
// Turns a tokenised caption (list of word strings) into the
// fixed-width integer arrays the model consumes:
//
//   tokens  ["a", "cat", "<eos>"]       max_len = 5
//   label   [ 3,   7,     2,    0, 0]   IDs from the vocabulary
//   mask    [1.0, 1.0,   1.0, 0.0, 0.0] 1 = real token
//
// Truncation policy:
//   A caption longer than max_len is cut to exactly max_len
//   tokens and the LAST slot is overwritten with <eos>. This
//   is destructive on purpose — the model must always see a
//   terminated sequence, even if the original ending is lost.
//
// Mask policy:
//   The mask is computed directly from the caption length:
//   exactly `len` leading ones, zeros after. Deriving it from
//   the length (rather than searching the label for the first
//   padding zero) keeps the full-length edge case well
//   defined: a caption that fills all max_len slots simply
//   yields an all-ones mask.
//
// Reference: Rust Book §8 (Vectors and Slices)

use anyhow::{bail, Result};

use crate::domain::vocabulary::{Vocabulary, EOS_TOKEN};

/// A caption encoded to fixed width, together with its true
/// (post-truncation) token count.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedCaption {
    /// Token IDs, zero-padded to max_len
    pub ids: Vec<u32>,

    /// Number of real tokens in `ids` (<= max_len)
    pub len: usize,
}

/// Encode one tokenised caption into a zero-padded ID array of
/// exactly `max_len` elements.
///
/// Steps:
///   1. Truncate to max_len, forcing the final token to <eos>
///   2. Look up every token in the vocabulary (unknown → error)
///   3. Write IDs left-to-right, leave the tail as padding zeros
pub fn encode_caption(
    vocab: &Vocabulary,
    tokens: &[String],
    max_len: usize,
) -> Result<EncodedCaption> {
    let mut ids = vec![0u32; max_len];

    let truncated = tokens.len() > max_len;
    let len = tokens.len().min(max_len);

    for (j, word) in tokens.iter().take(len).enumerate() {
        // On truncation the last surviving slot becomes <eos>,
        // whatever word was there originally
        let word = if truncated && j == len - 1 {
            EOS_TOKEN
        } else {
            word.as_str()
        };

        ids[j] = match vocab.id_of(word) {
            Some(id) => id,
            None => bail!("Caption token '{}' is not in the vocabulary", word),
        };
    }

    Ok(EncodedCaption { ids, len })
}

/// Binary mask for a caption of `len` real tokens in a
/// max_len-wide label array: `len` leading ones, zeros after.
pub fn length_mask(len: usize, max_len: usize) -> Vec<f32> {
    let mut mask = vec![0.0f32; max_len];
    for slot in mask.iter_mut().take(len.min(max_len)) {
        *slot = 1.0;
    }
    mask
}
