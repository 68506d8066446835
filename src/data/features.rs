// ============================================================
// Layer 4 — Feature Loading
// ============================================================
// Loads the precomputed per-video feature matrices. An
// external extractor has already run every video through a
// CNN and saved one 2-D array per video:
//
//   <feats_dir>/<video_id>.npy   shape: (time_steps, feat_dim)
//
// Three operations happen here:
//
//   1. NpyDirSource — read one .npy file for one video
//   2. Concatenation — when several feature directories are
//      configured (e.g. two different CNN backbones), their
//      matrices are joined along the feature axis. All sources
//      must agree on the time-step count; a mismatch surfaces
//      as a shape error naming the video.
//   3. Auxiliary features — an optional extra directory whose
//      matrix is averaged over time into a single vector, then
//      tiled across the primary time-step count and joined
//      along the feature axis. This folds a clip-level
//      descriptor into every time step.
//
// Files are re-read from disk on every request. For single-pass
// training each video is touched once per epoch, so a cache
// would mostly hold arrays that are never reused.
//
// Reference: ndarray-npy crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use ndarray::{concatenate, Array2, Axis};
use ndarray_npy::read_npy;
use std::path::PathBuf;

use crate::domain::traits::FeatureSource;

// ─── NpyDirSource ─────────────────────────────────────────────────────────────
/// A directory of per-video .npy feature files.
/// Implements the FeatureSource trait from Layer 3.
pub struct NpyDirSource {
    /// Directory containing one <video_id>.npy per video
    dir: PathBuf,
}

impl NpyDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FeatureSource for NpyDirSource {
    /// Read `<dir>/<video_id>.npy` into a (time, dim) f32 matrix.
    /// A missing file or a non-2-D array is a hard error.
    fn load(&self, video_id: &str) -> Result<Array2<f32>> {
        let path = self.dir.join(format!("{video_id}.npy"));
        read_npy(&path)
            .with_context(|| format!("Cannot load feature file '{}'", path.display()))
    }
}

// ─── Multi-source concatenation ───────────────────────────────────────────────
/// Load the feature matrix for one video from every configured
/// source and concatenate them along the feature axis.
///
/// Shapes: k sources of (T, d_1) .. (T, d_k) → (T, d_1+..+d_k).
/// Sources disagreeing on T is a configuration error (features
/// extracted with different frame sampling) and is reported,
/// not silently truncated.
pub fn load_concatenated(
    sources: &[Box<dyn FeatureSource>],
    video_id: &str,
) -> Result<Array2<f32>> {
    let mut loaded = Vec::with_capacity(sources.len());
    for source in sources {
        loaded.push(source.load(video_id)?);
    }

    // Single source is the common case — skip the copy
    if loaded.len() == 1 {
        return Ok(loaded.remove(0));
    }

    let views: Vec<_> = loaded.iter().map(|m| m.view()).collect();
    concatenate(Axis(1), &views).with_context(|| {
        format!(
            "Feature sources disagree on time-step count for video '{}'",
            video_id
        )
    })
}

// ─── Auxiliary features ───────────────────────────────────────────────────────
/// Fold a clip-level auxiliary feature matrix into the primary
/// features:
///
///   1. Average `aux` over its time axis → one (aux_dim,) vector
///   2. Tile that vector across the primary time-step count
///   3. Concatenate along the feature axis
///
/// Result shape: (T, primary_dim + aux_dim).
pub fn append_time_averaged(primary: &Array2<f32>, aux: &Array2<f32>) -> Result<Array2<f32>> {
    let mean = aux
        .mean_axis(Axis(0))
        .context("Auxiliary feature matrix has no time steps to average")?;

    let time_steps = primary.nrows();
    let tiled = mean
        .broadcast((time_steps, mean.len()))
        .context("Cannot tile auxiliary feature vector across time steps")?;

    concatenate(Axis(1), &[primary.view(), tiled])
        .context("Cannot concatenate auxiliary features onto primary features")
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use ndarray_npy::write_npy;
    use tempfile::tempdir;

    /// Write `matrix` as <dir>/<id>.npy and return a source for it
    fn source_with(dir: &std::path::Path, id: &str, matrix: &Array2<f32>) -> Box<dyn FeatureSource> {
        write_npy(dir.join(format!("{id}.npy")), matrix).unwrap();
        Box::new(NpyDirSource::new(dir))
    }

    #[test]
    fn test_loads_npy_matrix() {
        let dir = tempdir().unwrap();
        let matrix = array![[1.0f32, 2.0], [3.0, 4.0]];
        let source = source_with(dir.path(), "v1", &matrix);

        let loaded = source.load("v1").unwrap();
        assert_eq!(loaded, matrix);
    }

    #[test]
    fn test_missing_feature_file_is_error() {
        let dir = tempdir().unwrap();
        let source = NpyDirSource::new(dir.path());
        let err = source.load("v_missing").unwrap_err();
        assert!(err.to_string().contains("v_missing.npy"));
    }

    #[test]
    fn test_concatenates_two_sources_along_feature_axis() {
        let dir_a = tempdir().unwrap();
        let dir_b = tempdir().unwrap();

        // Two sources with the same 10 time steps but different widths
        let a = Array2::<f32>::zeros((10, 4));
        let b = Array2::<f32>::ones((10, 3));
        let sources = vec![
            source_with(dir_a.path(), "v1", &a),
            source_with(dir_b.path(), "v1", &b),
        ];

        let joined = load_concatenated(&sources, "v1").unwrap();
        assert_eq!(joined.dim(), (10, 7));
        // First 4 columns from a (zeros), last 3 from b (ones)
        assert_eq!(joined[[5, 0]], 0.0);
        assert_eq!(joined[[5, 6]], 1.0);
    }

    #[test]
    fn test_mismatched_time_steps_is_error() {
        let dir_a = tempdir().unwrap();
        let dir_b = tempdir().unwrap();

        let sources = vec![
            source_with(dir_a.path(), "v1", &Array2::<f32>::zeros((10, 4))),
            source_with(dir_b.path(), "v1", &Array2::<f32>::zeros((8, 4))),
        ];

        let err = load_concatenated(&sources, "v1").unwrap_err();
        assert!(err.to_string().contains("time-step count"));
    }

    #[test]
    fn test_auxiliary_features_are_averaged_and_tiled() {
        let primary = Array2::<f32>::zeros((3, 2));
        // Mean over time of [[2,4],[4,8]] is [3,6]
        let aux = array![[2.0f32, 4.0], [4.0, 8.0]];

        let joined = append_time_averaged(&primary, &aux).unwrap();
        assert_eq!(joined.dim(), (3, 4));
        // Every time step carries the same averaged aux vector
        for t in 0..3 {
            assert_eq!(joined[[t, 2]], 3.0);
            assert_eq!(joined[[t, 3]], 6.0);
        }
    }
}
