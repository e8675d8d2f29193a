//! Error types for voxel data construction.

/// Result type for voxel type construction.
pub type TypesResult<T> = Result<T, TypesError>;

/// Errors that can occur when building grids or attribute arrays.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TypesError {
    /// Every grid extent must be at least one voxel.
    #[error("invalid grid extents: {nx}x{ny}x{nz}")]
    InvalidExtents {
        /// Extent along x.
        nx: usize,
        /// Extent along y.
        ny: usize,
        /// Extent along z.
        nz: usize,
    },

    /// The voxel count does not fit in `usize`.
    #[error("voxel count overflows for extents {nx}x{ny}x{nz}")]
    VoxelCountOverflow {
        /// Extent along x.
        nx: usize,
        /// Extent along y.
        ny: usize,
        /// Extent along z.
        nz: usize,
    },

    /// Attribute arrays need at least one component per tuple.
    #[error("attribute array `{name}` has zero components")]
    ZeroComponents {
        /// Name of the offending array.
        name: String,
    },

    /// The value count is not a whole number of tuples.
    #[error("attribute array `{name}` holds {values} values, not a multiple of {components} components")]
    ComponentMismatch {
        /// Name of the offending array.
        name: String,
        /// Number of values supplied.
        values: usize,
        /// Declared component count.
        components: usize,
    },
}
