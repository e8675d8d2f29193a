//! Property-based tests for grid indexing.
//!
//! Run with: cargo test -p voxel-types -- proptest

use proptest::prelude::*;
use voxel_types::{Direction, GridExtents};

/// Generate small but irregular grid extents.
fn arb_extents() -> impl Strategy<Value = GridExtents> {
    (1usize..8, 1usize..8, 1usize..8)
        .prop_map(|(nx, ny, nz)| GridExtents::new(nx, ny, nz).unwrap())
}

/// Generate extents together with a voxel index inside them.
fn arb_extents_and_index() -> impl Strategy<Value = (GridExtents, usize)> {
    arb_extents().prop_flat_map(|extents| (Just(extents), 0..extents.voxel_count()))
}

proptest! {
    /// Index and coordinate conversions are inverse.
    #[test]
    fn coord_index_inverse((extents, idx) in arb_extents_and_index()) {
        let coord = extents.coord(idx);
        prop_assert!(extents.contains(coord));
        prop_assert_eq!(extents.index(coord), idx);
    }

    /// Face adjacency is symmetric: stepping back returns to the start.
    #[test]
    fn neighbors_are_symmetric((extents, idx) in arb_extents_and_index()) {
        let coord = extents.coord(idx);
        for dir in Direction::ALL {
            if let Some(n) = extents.neighbor(coord, dir) {
                prop_assert_eq!(extents.neighbor(extents.coord(n), dir.opposite()), Some(idx));
            }
        }
    }

    /// Interior voxels have all six neighbours, and each missing neighbour
    /// means the voxel sits on the corresponding face.
    #[test]
    fn missing_neighbors_only_on_faces((extents, idx) in arb_extents_and_index()) {
        let coord = extents.coord(idx);
        let neighbors = extents.face_neighbors(idx);
        let present = neighbors.iter().flatten().count();
        if !extents.is_boundary(coord) {
            prop_assert_eq!(present, 6);
        }
        for (dir, n) in Direction::ALL.into_iter().zip(neighbors) {
            if n.is_none() {
                let (dx, dy, dz) = dir.delta();
                let on_face = (dx < 0 && coord.x == 0)
                    || (dx > 0 && coord.x + 1 == extents.nx())
                    || (dy < 0 && coord.y == 0)
                    || (dy > 0 && coord.y + 1 == extents.ny())
                    || (dz < 0 && coord.z == 0)
                    || (dz > 0 && coord.z + 1 == extents.nz());
                prop_assert!(on_face);
            }
        }
    }
}
