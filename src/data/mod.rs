// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from files on disk
// all the way to GPU-ready tensor batches.
//
// The pipeline flows in this order:
//
//   info JSON + caption JSON + .npy feature dirs
//       │
//       ▼
//   NpyDirSource      → reads per-video feature matrices
//       │
//       ▼
//   encoder           → truncates + encodes captions to
//       │               fixed-length ID arrays with masks
//       ▼
//   VideoDataset      → implements Burn's Dataset trait:
//       │               index → CaptionExample
//       ▼
//   CaptionBatcher    → stacks examples into tensor batches,
//       │               padding features to the batch max
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Reads per-video .npy feature files, concatenates sources,
/// folds in the optional time-averaged auxiliary features
pub mod features;

/// Caption truncation, fixed-length encoding, and length masks
pub mod encoder;

/// Implements Burn's Dataset trait for caption examples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
