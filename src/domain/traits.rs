// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Traits are Rust's way of defining shared behaviour —
// similar to interfaces in Java or abstract classes in Python.
//
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - NpyDirSource implements FeatureSource
//   - A future Hdf5Source could also implement FeatureSource
//   - The dataset layer only sees FeatureSource
//     and works with both without any changes
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use anyhow::Result;
use ndarray::Array2;

// ─── FeatureSource ────────────────────────────────────────────────────────────
/// Any component that can produce the precomputed feature
/// matrix (time-steps × feature-dim) for one video.
///
/// Implementations:
///   - NpyDirSource → one <video_id>.npy file per video in a directory
///   - (future) Hdf5Source → all videos in one HDF5 container
///
/// Must be Send + Sync: the dataset is shared across parallel
/// data-loading workers, and every implementation is expected
/// to be read-only per call.
pub trait FeatureSource: Send + Sync {
    /// Load the feature matrix for the given video identifier.
    /// A missing or unreadable file is a hard error — there is
    /// no fallback feature representation.
    fn load(&self, video_id: &str) -> Result<Array2<f32>>;
}
