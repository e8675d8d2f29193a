//! Voxel coordinate and face-direction types.

/// A discrete 3D coordinate inside a dense grid.
///
/// Dense grids are indexed from the origin corner, so components are
/// unsigned. Use [`GridExtents::index`](crate::GridExtents::index) and
/// [`GridExtents::coord`](crate::GridExtents::coord) to move between a
/// coordinate and its linear index.
///
/// # Example
///
/// ```
/// use voxel_types::VoxelCoord;
///
/// let coord = VoxelCoord::new(1, 2, 3);
/// assert_eq!(coord.x, 1);
/// assert_eq!(coord.y, 2);
/// assert_eq!(coord.z, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelCoord {
    /// X coordinate (fastest-varying axis).
    pub x: usize,
    /// Y coordinate.
    pub y: usize,
    /// Z coordinate (slowest-varying axis).
    pub z: usize,
}

impl VoxelCoord {
    /// Creates a new voxel coordinate.
    #[must_use]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Creates a coordinate at the origin corner (0, 0, 0).
    ///
    /// # Example
    ///
    /// ```
    /// use voxel_types::VoxelCoord;
    ///
    /// assert_eq!(VoxelCoord::origin(), VoxelCoord::new(0, 0, 0));
    /// ```
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0, 0)
    }

    /// Returns the coordinate as an array.
    #[must_use]
    pub const fn as_array(self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }

    /// Returns the Manhattan distance to another coordinate.
    ///
    /// Face-adjacent voxels are exactly one step apart.
    ///
    /// # Example
    ///
    /// ```
    /// use voxel_types::VoxelCoord;
    ///
    /// let a = VoxelCoord::new(1, 1, 1);
    /// assert_eq!(a.manhattan_distance(VoxelCoord::new(1, 1, 2)), 1);
    /// assert_eq!(a.manhattan_distance(VoxelCoord::new(2, 2, 1)), 2);
    /// ```
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }
}

impl From<[usize; 3]> for VoxelCoord {
    fn from(arr: [usize; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<(usize, usize, usize)> for VoxelCoord {
    fn from((x, y, z): (usize, usize, usize)) -> Self {
        Self::new(x, y, z)
    }
}

impl std::fmt::Display for VoxelCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// One of the six face-adjacent directions.
///
/// The declaration order is the neighbour scan order used by void healing:
/// `-z, -y, -x, +x, +y, +z`. [`Direction::ALL`] lists them in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Towards the previous z-slice.
    NegZ,
    /// Towards the previous row.
    NegY,
    /// Towards the previous column.
    NegX,
    /// Towards the next column.
    PosX,
    /// Towards the next row.
    PosY,
    /// Towards the next z-slice.
    PosZ,
}

impl Direction {
    /// All six directions in scan order.
    pub const ALL: [Self; 6] = [
        Self::NegZ,
        Self::NegY,
        Self::NegX,
        Self::PosX,
        Self::PosY,
        Self::PosZ,
    ];

    /// Returns the direction pointing the other way.
    ///
    /// # Example
    ///
    /// ```
    /// use voxel_types::Direction;
    ///
    /// assert_eq!(Direction::NegZ.opposite(), Direction::PosZ);
    /// assert_eq!(Direction::PosX.opposite(), Direction::NegX);
    /// ```
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::NegZ => Self::PosZ,
            Self::NegY => Self::PosY,
            Self::NegX => Self::PosX,
            Self::PosX => Self::NegX,
            Self::PosY => Self::NegY,
            Self::PosZ => Self::NegZ,
        }
    }

    /// Returns the `(dx, dy, dz)` step of this direction.
    #[must_use]
    pub const fn delta(self) -> (isize, isize, isize) {
        match self {
            Self::NegZ => (0, 0, -1),
            Self::NegY => (0, -1, 0),
            Self::NegX => (-1, 0, 0),
            Self::PosX => (1, 0, 0),
            Self::PosY => (0, 1, 0),
            Self::PosZ => (0, 0, 1),
        }
    }
}
