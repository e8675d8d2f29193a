//! Error types for feature removal.

use thiserror::Error;
use voxel_types::TypesError;

/// Result type for removal operations.
pub type RemovalResult<T> = Result<T, RemovalError>;

/// Errors that can occur while removing flagged features.
///
/// Every error is raised before the label array is touched, so a failed call
/// leaves the caller's data exactly as it was.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemovalError {
    /// Every non-background feature was flagged.
    #[error("All features were flagged and would all be removed; the operation was aborted.")]
    AllFeaturesFlagged,

    /// The flagged-feature mask has no entries, not even the background.
    #[error("flagged-feature mask is empty")]
    EmptyFeatureMask,

    /// The label array does not cover the grid.
    #[error("label array has {actual} voxels but the grid holds {expected}")]
    LabelCountMismatch {
        /// Voxel count of the grid.
        expected: usize,
        /// Length of the label array.
        actual: usize,
    },

    /// A voxel carries a label that names no known feature.
    #[error("voxel {index} has label {label}, outside the {total_features} known features")]
    LabelOutOfRange {
        /// Linear index of the voxel.
        index: usize,
        /// The offending label.
        label: i32,
        /// Number of features in the flagged mask.
        total_features: usize,
    },

    /// A propagated attribute array does not have one tuple per voxel.
    #[error("attribute array `{name}` has {actual} tuples but the grid holds {expected}")]
    AttributeTupleMismatch {
        /// Name of the attribute array.
        name: String,
        /// Voxel count of the grid.
        expected: usize,
        /// Tuple count of the array.
        actual: usize,
    },

    /// The compaction step reported a failure.
    #[error("feature compaction failed: {reason}")]
    CompactionFailed {
        /// Reason for failure.
        reason: String,
    },

    /// Building a grid or attribute array failed.
    #[error(transparent)]
    Types(#[from] TypesError),
}
