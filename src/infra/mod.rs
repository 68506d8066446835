// ============================================================
// Layer 5 — Infrastructure Layer
// ============================================================
// Handles the file-format contracts with the external
// preprocessing pipeline. Both files are produced upstream
// (vocabulary building, caption tokenisation) and are strictly
// read-only here:
//
//   info_store.rs    — Loads the info JSON: the token <-> ID
//                      vocabulary ("ix_to_word"/"word_to_ix")
//                      and the per-split video manifest
//                      ("videos": train/val/test lists).
//
//   caption_store.rs — Loads the caption JSON: for each video
//                      id, the "final_captions" list of
//                      already-tokenised caption word lists.
//
// Why is this a separate layer?
//   The JSON shapes are an external contract we do not own.
//   Keeping the serde structs and path handling here means
//   the domain and data layers never see raw JSON — they get
//   validated Vocabulary / SplitManifest / CaptionStore values
//   or a construction-time error, never a half-parsed file.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Info JSON loading: vocabulary + split manifest
pub mod info_store;

/// Caption JSON loading: per-video tokenised captions
pub mod caption_store;
