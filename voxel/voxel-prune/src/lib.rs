//! Flagged-feature removal and void healing for labeled voxel grids.
//!
//! Every voxel of a segmented volume carries the id of the feature (grain,
//! region) it belongs to. This crate provides tools for:
//! - Deactivating flagged features (their voxels become background or `-1`)
//! - Healing the resulting voids from 6-connected neighbours, carrying every
//!   sibling attribute array along with the label
//! - Detecting voids that healing cannot reach
//! - Validating label arrays
//! - Handing the surviving-feature mask to a compaction step
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with zero Bevy dependencies.
//!
//! # Example
//!
//! ```
//! use std::sync::atomic::AtomicBool;
//! use voxel_prune::{
//!     AttributeSet, RemovalParams, RemovalResult, remove_flagged_features, validate_labels,
//! };
//! use voxel_types::{DataArray, GridExtents};
//!
//! // Two grains side by side; grain 2 is flagged for removal.
//! let extents = GridExtents::new(4, 2, 1).unwrap();
//! let mut labels = vec![1, 1, 2, 2, 1, 1, 2, 2];
//! let mut phases = DataArray::from_scalars("Phases", vec![1u8, 1, 2, 2, 1, 1, 2, 2]);
//!
//! let mut attributes = AttributeSet::new();
//! attributes.push(&mut phases);
//!
//! let mut compactor = |_: &[bool], _: &mut [i32], _: usize| -> RemovalResult<()> { Ok(()) };
//! let summary = remove_flagged_features(
//!     &mut labels,
//!     &[false, false, true],
//!     &extents,
//!     &mut attributes,
//!     &RemovalParams::with_healing(),
//!     &mut compactor,
//!     &AtomicBool::new(false),
//! )
//! .unwrap();
//! println!("{summary}");
//!
//! assert!(validate_labels(&labels, 3).is_fully_assigned());
//! assert_eq!(labels, vec![1; 8]);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod attributes;
mod compact;
mod deactivate;
mod error;
pub mod heal;
mod params;
mod pipeline;
mod validate;
pub mod voids;

pub use attributes::AttributeSet;
pub use compact::{FeatureCompactor, RenumberCompactor};
pub use deactivate::{Deactivation, active_feature_mask, deactivate_flagged_features};
pub use error::{RemovalError, RemovalResult};
pub use params::{FillMode, HealParams, RemovalParams};
pub use pipeline::{RemovalSummary, remove_flagged_features};
pub use validate::{LabelReport, unassigned_voxels, validate_labels};

// Re-export commonly used items from submodules
pub use heal::{HealOutcome, heal_voids, heal_voids_with_params};
pub use voids::{VoidRegion, detect_voids};
