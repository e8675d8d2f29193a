//! Core data types for labeled voxel grids.
//!
//! This crate provides the foundational types shared by the voxel processing
//! crates:
//!
//! - [`GridExtents`] - Dense grid dimensions with row-major linear indexing
//! - [`VoxelCoord`] - Unsigned voxel coordinates
//! - [`Direction`] - The six face directions in their fixed scan order
//! - [`AttributeArray`] and [`DataArray`] - Per-voxel sibling data
//! - [`BACKGROUND_FEATURE`] and [`UNASSIGNED`] - Label conventions
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Python bindings
//!
//! # Memory Layout
//!
//! Voxels live in a flat buffer with x varying fastest, then y, then z:
//!
//! ```text
//! index = x + nx * y + nx * ny * z
//! ```
//!
//! Face neighbours are one step along a single axis. [`GridExtents::neighbor`]
//! applies the boundary guards, so a voxel at the end of a row never sees the
//! first voxel of the next row as a neighbour.
//!
//! # Example
//!
//! ```
//! use voxel_types::{AttributeArray, DataArray, Direction, GridExtents, VoxelCoord};
//!
//! let extents = GridExtents::new(3, 3, 1).unwrap();
//! let centre = VoxelCoord::new(1, 1, 0);
//!
//! // A single slice has no z neighbours.
//! assert_eq!(extents.neighbor(centre, Direction::NegZ), None);
//! assert_eq!(extents.neighbor(centre, Direction::NegY), Some(1));
//!
//! // Sibling data follows the same indexing.
//! let mut phases = DataArray::from_scalars("Phases", vec![1i32; extents.voxel_count()]);
//! phases.copy_tuple(1, 4);
//! assert_eq!(phases.tuple_count(), 9);
//! ```
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod attribute;
mod error;
mod extents;
mod labels;
mod voxel;

pub use attribute::{AttributeArray, DataArray};
pub use error::{TypesError, TypesResult};
pub use extents::{CoordIter, GridExtents};
pub use labels::{BACKGROUND_FEATURE, UNASSIGNED, is_assigned};
pub use voxel::{Direction, VoxelCoord};
