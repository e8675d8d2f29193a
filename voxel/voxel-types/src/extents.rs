//! Dense grid extents and linear indexing.

use crate::error::{TypesError, TypesResult};
use crate::voxel::{Direction, VoxelCoord};

/// Extents of a dense, row-major voxel grid.
///
/// Voxels are stored in a flat buffer with x varying fastest, then y, then z:
/// `index = x + nx * y + nx * ny * z`. Every extent is at least one and the
/// total voxel count is guaranteed to fit in `usize`, so index arithmetic on a
/// valid coordinate never overflows.
///
/// # Example
///
/// ```
/// use voxel_types::{GridExtents, VoxelCoord};
///
/// let extents = GridExtents::new(4, 3, 2).unwrap();
/// assert_eq!(extents.voxel_count(), 24);
///
/// let idx = extents.index(VoxelCoord::new(1, 2, 1));
/// assert_eq!(idx, 1 + 4 * 2 + 12);
/// assert_eq!(extents.coord(idx), VoxelCoord::new(1, 2, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[usize; 3]", into = "[usize; 3]"))]
pub struct GridExtents {
    nx: usize,
    ny: usize,
    nz: usize,
}

impl GridExtents {
    /// Creates extents for an `nx` by `ny` by `nz` grid.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::InvalidExtents`] if any extent is zero, or
    /// [`TypesError::VoxelCountOverflow`] if the voxel count overflows `usize`.
    ///
    /// # Example
    ///
    /// ```
    /// use voxel_types::GridExtents;
    ///
    /// assert!(GridExtents::new(5, 1, 1).is_ok());
    /// assert!(GridExtents::new(0, 1, 1).is_err());
    /// ```
    pub fn new(nx: usize, ny: usize, nz: usize) -> TypesResult<Self> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(TypesError::InvalidExtents { nx, ny, nz });
        }
        if nx.checked_mul(ny).and_then(|s| s.checked_mul(nz)).is_none() {
            return Err(TypesError::VoxelCountOverflow { nx, ny, nz });
        }
        Ok(Self { nx, ny, nz })
    }

    /// Extent along x.
    #[must_use]
    pub const fn nx(&self) -> usize {
        self.nx
    }

    /// Extent along y.
    #[must_use]
    pub const fn ny(&self) -> usize {
        self.ny
    }

    /// Extent along z.
    #[must_use]
    pub const fn nz(&self) -> usize {
        self.nz
    }

    /// Returns `[nx, ny, nz]`.
    #[must_use]
    pub const fn dims(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    /// Number of voxels in one z-slice (`nx * ny`).
    #[must_use]
    pub const fn slice_len(&self) -> usize {
        self.nx * self.ny
    }

    /// Total number of voxels (`nx * ny * nz`).
    #[must_use]
    pub const fn voxel_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Checks whether a coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, coord: VoxelCoord) -> bool {
        coord.x < self.nx && coord.y < self.ny && coord.z < self.nz
    }

    /// Linear index of an in-bounds coordinate.
    ///
    /// The coordinate is not checked; use [`checked_index`](Self::checked_index)
    /// for untrusted input.
    #[must_use]
    pub const fn index(&self, coord: VoxelCoord) -> usize {
        coord.x + self.nx * coord.y + self.slice_len() * coord.z
    }

    /// Linear index of a coordinate, or `None` if it lies outside the grid.
    ///
    /// # Example
    ///
    /// ```
    /// use voxel_types::{GridExtents, VoxelCoord};
    ///
    /// let extents = GridExtents::new(2, 2, 2).unwrap();
    /// assert_eq!(extents.checked_index(VoxelCoord::new(1, 1, 1)), Some(7));
    /// assert_eq!(extents.checked_index(VoxelCoord::new(2, 0, 0)), None);
    /// ```
    #[must_use]
    pub const fn checked_index(&self, coord: VoxelCoord) -> Option<usize> {
        if self.contains(coord) {
            Some(self.index(coord))
        } else {
            None
        }
    }

    /// Coordinate of a linear index.
    ///
    /// The index is not checked against [`voxel_count`](Self::voxel_count).
    #[must_use]
    pub const fn coord(&self, index: usize) -> VoxelCoord {
        let slice = self.slice_len();
        let z = index / slice;
        let rem = index % slice;
        VoxelCoord::new(rem % self.nx, rem / self.nx, z)
    }

    /// Checks whether a coordinate lies on any face of the grid.
    #[must_use]
    pub const fn is_boundary(&self, coord: VoxelCoord) -> bool {
        coord.x == 0
            || coord.y == 0
            || coord.z == 0
            || coord.x + 1 == self.nx
            || coord.y + 1 == self.ny
            || coord.z + 1 == self.nz
    }

    /// Linear index of the face neighbour of `coord` in direction `dir`.
    ///
    /// Returns `None` when the step would leave the grid: `-z` at `z == 0`,
    /// `+z` at `z == nz - 1`, and likewise for y and x. Never wraps across a
    /// row or slice.
    ///
    /// # Example
    ///
    /// ```
    /// use voxel_types::{Direction, GridExtents, VoxelCoord};
    ///
    /// let extents = GridExtents::new(3, 2, 1).unwrap();
    /// let corner = VoxelCoord::new(2, 0, 0);
    ///
    /// assert_eq!(extents.neighbor(corner, Direction::NegX), Some(1));
    /// assert_eq!(extents.neighbor(corner, Direction::PosY), Some(5));
    /// // Index 3 is the next linear slot, but it belongs to the next row.
    /// assert_eq!(extents.neighbor(corner, Direction::PosX), None);
    /// assert_eq!(extents.neighbor(corner, Direction::PosZ), None);
    /// ```
    #[must_use]
    pub const fn neighbor(&self, coord: VoxelCoord, dir: Direction) -> Option<usize> {
        let index = self.index(coord);
        match dir {
            Direction::NegZ => {
                if coord.z == 0 {
                    None
                } else {
                    Some(index - self.slice_len())
                }
            }
            Direction::NegY => {
                if coord.y == 0 {
                    None
                } else {
                    Some(index - self.nx)
                }
            }
            Direction::NegX => {
                if coord.x == 0 {
                    None
                } else {
                    Some(index - 1)
                }
            }
            Direction::PosX => {
                if coord.x + 1 >= self.nx {
                    None
                } else {
                    Some(index + 1)
                }
            }
            Direction::PosY => {
                if coord.y + 1 >= self.ny {
                    None
                } else {
                    Some(index + self.nx)
                }
            }
            Direction::PosZ => {
                if coord.z + 1 >= self.nz {
                    None
                } else {
                    Some(index + self.slice_len())
                }
            }
        }
    }

    /// Face neighbours of a linear index, in [`Direction::ALL`] order.
    ///
    /// Out-of-bounds directions are `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use voxel_types::GridExtents;
    ///
    /// let extents = GridExtents::new(3, 3, 1).unwrap();
    /// // Centre of a single slice: no z neighbours.
    /// assert_eq!(
    ///     extents.face_neighbors(4),
    ///     [None, Some(1), Some(3), Some(5), Some(7), None]
    /// );
    /// ```
    #[must_use]
    pub fn face_neighbors(&self, index: usize) -> [Option<usize>; 6] {
        let coord = self.coord(index);
        Direction::ALL.map(|dir| self.neighbor(coord, dir))
    }

    /// Iterates over every coordinate in linear-index order (x fastest).
    ///
    /// # Example
    ///
    /// ```
    /// use voxel_types::GridExtents;
    ///
    /// let extents = GridExtents::new(2, 2, 2).unwrap();
    /// let coords: Vec<_> = extents.coords().collect();
    /// assert_eq!(coords.len(), 8);
    /// for (idx, coord) in coords.into_iter().enumerate() {
    ///     assert_eq!(extents.index(coord), idx);
    /// }
    /// ```
    #[must_use]
    pub const fn coords(&self) -> CoordIter {
        CoordIter {
            extents: *self,
            current: Some(VoxelCoord::origin()),
        }
    }
}

impl TryFrom<[usize; 3]> for GridExtents {
    type Error = TypesError;

    fn try_from([nx, ny, nz]: [usize; 3]) -> TypesResult<Self> {
        Self::new(nx, ny, nz)
    }
}

impl From<GridExtents> for [usize; 3] {
    fn from(extents: GridExtents) -> Self {
        extents.dims()
    }
}

impl std::fmt::Display for GridExtents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.nx, self.ny, self.nz)
    }
}

impl IntoIterator for &GridExtents {
    type Item = VoxelCoord;
    type IntoIter = CoordIter;

    fn into_iter(self) -> Self::IntoIter {
        self.coords()
    }
}

/// Iterator over all coordinates of a [`GridExtents`] in linear-index order.
#[derive(Debug, Clone)]
pub struct CoordIter {
    extents: GridExtents,
    current: Option<VoxelCoord>,
}

impl Iterator for CoordIter {
    type Item = VoxelCoord;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;

        let mut next = current;
        next.x += 1;
        if next.x == self.extents.nx {
            next.x = 0;
            next.y += 1;
            if next.y == self.extents.ny {
                next.y = 0;
                next.z += 1;
                if next.z == self.extents.nz {
                    self.current = None;
                    return Some(current);
                }
            }
        }
        self.current = Some(next);

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.current.map_or(0, |current| {
            self.extents.voxel_count() - self.extents.index(current)
        });
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CoordIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_extent() {
        assert!(matches!(
            GridExtents::new(3, 0, 2),
            Err(TypesError::InvalidExtents { nx: 3, ny: 0, nz: 2 })
        ));
    }

    #[test]
    fn rejects_overflowing_count() {
        assert!(matches!(
            GridExtents::new(usize::MAX, 2, 1),
            Err(TypesError::VoxelCountOverflow { .. })
        ));
    }

    #[test]
    fn index_round_trip_covers_grid() {
        let extents = GridExtents::new(4, 3, 5).unwrap();
        for idx in 0..extents.voxel_count() {
            let coord = extents.coord(idx);
            assert!(extents.contains(coord));
            assert_eq!(extents.index(coord), idx);
        }
    }

    #[test]
    fn scan_order_offsets_in_interior() {
        let extents = GridExtents::new(4, 3, 5).unwrap();
        let centre = VoxelCoord::new(1, 1, 2);
        let idx = extents.index(centre);
        let got = extents.face_neighbors(idx);
        assert_eq!(
            got,
            [
                Some(idx - 12),
                Some(idx - 4),
                Some(idx - 1),
                Some(idx + 1),
                Some(idx + 4),
                Some(idx + 12),
            ]
        );
    }

    #[test]
    fn guards_on_every_face() {
        let extents = GridExtents::new(3, 3, 3).unwrap();
        let min = VoxelCoord::origin();
        let max = VoxelCoord::new(2, 2, 2);

        assert_eq!(extents.neighbor(min, Direction::NegX), None);
        assert_eq!(extents.neighbor(min, Direction::NegY), None);
        assert_eq!(extents.neighbor(min, Direction::NegZ), None);
        assert_eq!(extents.neighbor(max, Direction::PosX), None);
        assert_eq!(extents.neighbor(max, Direction::PosY), None);
        assert_eq!(extents.neighbor(max, Direction::PosZ), None);

        assert_eq!(extents.neighbor(min, Direction::PosX), Some(1));
        assert_eq!(extents.neighbor(min, Direction::PosY), Some(3));
        assert_eq!(extents.neighbor(min, Direction::PosZ), Some(9));
    }

    #[test]
    fn row_ends_do_not_wrap() {
        let extents = GridExtents::new(3, 2, 1).unwrap();
        // (2, 0, 0) and (0, 1, 0) are linearly adjacent but not face neighbours.
        assert!(!extents.face_neighbors(2).contains(&Some(3)));
        assert!(!extents.face_neighbors(3).contains(&Some(2)));
    }

    #[test]
    fn single_voxel_has_no_neighbors() {
        let extents = GridExtents::new(1, 1, 1).unwrap();
        assert_eq!(extents.face_neighbors(0), [None; 6]);
        assert!(extents.is_boundary(VoxelCoord::origin()));
    }

    #[test]
    fn neighbors_are_face_adjacent() {
        let extents = GridExtents::new(3, 4, 2).unwrap();
        for idx in 0..extents.voxel_count() {
            let here = extents.coord(idx);
            for n in extents.face_neighbors(idx).into_iter().flatten() {
                assert!(n < extents.voxel_count());
                assert_eq!(here.manhattan_distance(extents.coord(n)), 1);
            }
        }
    }

    #[test]
    fn boundary_detection() {
        let extents = GridExtents::new(3, 3, 3).unwrap();
        assert!(!extents.is_boundary(VoxelCoord::new(1, 1, 1)));
        assert!(extents.is_boundary(VoxelCoord::new(1, 1, 2)));
        assert!(extents.is_boundary(VoxelCoord::new(0, 1, 1)));
    }

    #[test]
    fn coord_iter_size_hint() {
        let extents = GridExtents::new(2, 3, 4).unwrap();
        let mut iter = extents.coords();
        assert_eq!(iter.len(), 24);
        iter.next();
        assert_eq!(iter.len(), 23);
        assert_eq!(iter.count(), 23);
    }

    #[test]
    fn display_and_array_conversion() {
        let extents = GridExtents::new(5, 1, 2).unwrap();
        assert_eq!(extents.to_string(), "5x1x2");
        let dims: [usize; 3] = extents.into();
        assert_eq!(GridExtents::try_from(dims).unwrap(), extents);
        assert!(GridExtents::try_from([0, 1, 1]).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_validates_on_load() {
        let extents = GridExtents::new(4, 2, 3).unwrap();
        let json = serde_json::to_string(&extents).unwrap();
        assert_eq!(json, "[4,2,3]");
        let back: GridExtents = serde_json::from_str(&json).unwrap();
        assert_eq!(back, extents);
        assert!(serde_json::from_str::<GridExtents>("[4,0,3]").is_err());
    }
}
