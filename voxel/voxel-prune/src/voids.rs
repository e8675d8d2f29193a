//! Void detection.
//!
//! A void is a 6-connected region of unassigned voxels. Healing can only
//! reach a void that touches at least one labeled voxel; the rest stay `-1`
//! forever. [`detect_voids`] tells the two apart up front.

use tracing::debug;
use voxel_types::{GridExtents, UNASSIGNED, is_assigned};

use crate::error::RemovalResult;
use crate::heal::check_labels;

/// A connected region of unassigned voxels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoidRegion {
    /// Linear indices of the voxels in the region, in discovery order.
    ///
    /// The first entry is the region's lowest index.
    pub voxels: Vec<usize>,
    /// Whether any voxel in the region has a labeled face neighbour.
    pub healable: bool,
}

impl VoidRegion {
    /// Number of voxels in the region.
    #[must_use]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Check if the region is empty (never true for detected regions).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Lowest linear index in the region.
    #[must_use]
    pub fn seed(&self) -> Option<usize> {
        self.voxels.first().copied()
    }
}

/// Find every 6-connected region of unassigned voxels.
///
/// Regions are returned in order of their lowest linear index. Labels other
/// than `-1` (including out-of-range ones) count as assigned walls.
///
/// # Errors
///
/// Returns [`RemovalError::LabelCountMismatch`](crate::RemovalError::LabelCountMismatch)
/// if `labels` does not cover the grid.
///
/// # Example
///
/// ```
/// use voxel_prune::detect_voids;
/// use voxel_types::GridExtents;
///
/// let extents = GridExtents::new(5, 1, 1).unwrap();
/// let voids = detect_voids(&[-1, 3, -1, -1, 3], &extents).unwrap();
///
/// assert_eq!(voids.len(), 2);
/// assert_eq!(voids[0].voxels, vec![0]);
/// assert_eq!(voids[1].len(), 2);
/// assert!(voids.iter().all(|v| v.healable));
/// ```
pub fn detect_voids(labels: &[i32], extents: &GridExtents) -> RemovalResult<Vec<VoidRegion>> {
    check_labels(labels, extents)?;

    let n = extents.voxel_count();
    let mut visited = vec![false; n];
    let mut regions = Vec::new();
    let mut stack = Vec::new();

    for seed in 0..n {
        if visited[seed] || labels[seed] != UNASSIGNED {
            continue;
        }

        visited[seed] = true;
        stack.push(seed);
        let mut voxels = Vec::new();
        let mut healable = false;

        while let Some(idx) = stack.pop() {
            voxels.push(idx);
            for neighbor in extents.face_neighbors(idx).into_iter().flatten() {
                let label = labels[neighbor];
                if label == UNASSIGNED {
                    if !visited[neighbor] {
                        visited[neighbor] = true;
                        stack.push(neighbor);
                    }
                } else if is_assigned(label) {
                    healable = true;
                }
            }
        }

        regions.push(VoidRegion { voxels, healable });
    }

    debug!(
        regions = regions.len(),
        unreachable = regions.iter().filter(|r| !r.healable).count(),
        "Detected voids"
    );

    Ok(regions)
}
