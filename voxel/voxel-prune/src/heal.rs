//! Void healing by 6-connected neighbour voting.
//!
//! Unassigned voxels (label `-1`) are filled from their face neighbours, one
//! layer per pass, until a pass fills nothing.
//!
//! # Algorithm
//!
//! Each pass has two sub-phases:
//!
//! 1. **Vote.** Every unassigned voxel looks at its in-bounds face neighbours
//!    in the fixed order `-z, -y, -x, +x, +y, +z`. Each assigned neighbour
//!    adds one vote for its label. Whenever a label's count strictly exceeds
//!    the best count so far, that neighbour becomes the voxel's source, so
//!    the first direction to reach the winning count wins ties.
//! 2. **Copy.** Once every vote is in, each voted voxel copies its label and
//!    every propagated attribute tuple from its source.
//!
//! Votes only read labels as they stood at the start of the pass, so the
//! resolved region grows by exactly one voxel layer per pass: a multi-source
//! breadth-first wavefront.
//!
//! # Performance
//!
//! Only the still-unassigned voxels are visited each pass, but the number of
//! passes equals the longest path from a valid voxel into the void. Long,
//! thin voids (a one-voxel corridor through the whole grid) therefore cost
//! `O(length²)` work.
//!
//! # Example
//!
//! ```
//! use std::sync::atomic::AtomicBool;
//! use voxel_prune::heal_voids;
//! use voxel_types::{AttributeArray, DataArray, GridExtents};
//!
//! let extents = GridExtents::new(5, 1, 1).unwrap();
//! let mut labels = vec![2, 2, -1, -1, -1];
//! let mut phases = DataArray::from_scalars("Phases", vec![7u8, 7, 0, 0, 0]);
//!
//! let mut attributes: [&mut dyn AttributeArray; 1] = [&mut phases];
//! let outcome = heal_voids(&mut labels, &mut attributes, &extents, &AtomicBool::new(false)).unwrap();
//!
//! assert_eq!(labels, vec![2; 5]);
//! assert_eq!(phases.values(), &[7; 5]);
//! assert_eq!(outcome.passes, 4);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use smallvec::SmallVec;
use tracing::{debug, info, warn};
use voxel_types::{AttributeArray, GridExtents, UNASSIGNED, is_assigned};

use crate::error::{RemovalError, RemovalResult};
use crate::params::HealParams;

/// Result of a void-healing run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealOutcome {
    /// Number of outer passes, including the final pass that filled nothing.
    pub passes: usize,
    /// Number of voxels filled.
    pub voxels_healed: usize,
    /// Voxels still unassigned when the loop stopped.
    pub unresolved: usize,
    /// Whether the run stopped early because cancellation was requested.
    pub cancelled: bool,
}

impl HealOutcome {
    /// Check if every voxel ended up with a label.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved == 0 && !self.cancelled
    }
}

impl std::fmt::Display for HealOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Heal: {} voxels filled in {} passes, {} unresolved",
            self.voxels_healed, self.passes, self.unresolved
        )?;
        if self.cancelled {
            write!(f, " (cancelled)")?;
        }
        Ok(())
    }
}

/// Marker for a vote sub-phase interrupted by cancellation.
struct Cancelled;

/// Heal unassigned voxels with default [`HealParams`].
///
/// See [`heal_voids_with_params`].
///
/// # Errors
///
/// See [`heal_voids_with_params`].
pub fn heal_voids<A>(
    labels: &mut [i32],
    attributes: &mut [&mut A],
    extents: &GridExtents,
    cancel: &AtomicBool,
) -> RemovalResult<HealOutcome>
where
    A: AttributeArray + ?Sized,
{
    heal_voids_with_params(labels, attributes, extents, cancel, &HealParams::default())
}

/// Heal unassigned voxels by propagating labels and attributes from their
/// face neighbours until a pass fills nothing.
///
/// `attributes` are the sibling arrays to carry along; arrays that must keep
/// their values should already be filtered out (see
/// [`AttributeSet::propagation_targets`](crate::AttributeSet::propagation_targets)).
///
/// `cancel` is polled once per unassigned voxel while voting. When it is set,
/// the current pass is abandoned before any copy, so every voxel holds either
/// its old tuple or a complete tuple from a single source.
///
/// Voxels with no face-connected path to an assigned voxel stay `-1`. That is
/// reported in [`HealOutcome::unresolved`], not as an error.
///
/// # Errors
///
/// Returns [`RemovalError::LabelCountMismatch`] if `labels` does not cover the
/// grid, or [`RemovalError::AttributeTupleMismatch`] if an attribute array
/// does not have one tuple per voxel. Nothing is modified on error.
pub fn heal_voids_with_params<A>(
    labels: &mut [i32],
    attributes: &mut [&mut A],
    extents: &GridExtents,
    cancel: &AtomicBool,
    params: &HealParams,
) -> RemovalResult<HealOutcome>
where
    A: AttributeArray + ?Sized,
{
    check_labels(labels, extents)?;
    check_attributes(attributes, extents)?;

    let mut pending: Vec<usize> = labels
        .iter()
        .enumerate()
        .filter(|&(_, &label)| label == UNASSIGNED)
        .map(|(idx, _)| idx)
        .collect();

    info!(
        voxels = labels.len(),
        pending = pending.len(),
        attributes = attributes.len(),
        "Starting void healing"
    );

    let mut outcome = HealOutcome::default();

    loop {
        outcome.passes += 1;

        let sources = if params.votes_in_parallel(pending.len()) {
            vote_parallel(labels, extents, &pending, cancel)
        } else {
            vote_sequential(labels, extents, &pending, cancel)
        };
        let Ok(sources) = sources else {
            outcome.cancelled = true;
            info!(pass = outcome.passes, "Void healing cancelled");
            break;
        };

        let mut filled = 0;
        for (&dst, &source) in pending.iter().zip(&sources) {
            let Some(src) = source else {
                continue;
            };
            if !is_assigned(labels[src]) {
                continue;
            }
            labels[dst] = labels[src];
            for array in attributes.iter_mut() {
                array.copy_tuple(src, dst);
            }
            filled += 1;
        }

        outcome.voxels_healed += filled;
        pending.retain(|&idx| labels[idx] == UNASSIGNED);

        debug!(
            pass = outcome.passes,
            filled,
            remaining = pending.len(),
            "Healing pass complete"
        );

        if filled == 0 {
            break;
        }
    }

    outcome.unresolved = pending.len();

    if outcome.unresolved > 0 && !outcome.cancelled {
        warn!(
            unresolved = outcome.unresolved,
            "Voxels have no face-connected path to a labeled voxel and remain unassigned"
        );
    }

    info!(
        passes = outcome.passes,
        healed = outcome.voxels_healed,
        unresolved = outcome.unresolved,
        "Void healing finished"
    );

    Ok(outcome)
}

/// Pick the source voxel for one unassigned voxel.
///
/// Returns the face neighbour whose label first reaches the highest vote
/// count, or `None` if no neighbour is assigned.
fn vote(labels: &[i32], extents: &GridExtents, index: usize) -> Option<usize> {
    let mut tally: SmallVec<[(i32, u8); 6]> = SmallVec::new();
    let mut most = 0u8;
    let mut source = None;

    for neighbor in extents.face_neighbors(index).into_iter().flatten() {
        let label = labels[neighbor];
        if !is_assigned(label) {
            continue;
        }

        let count = if let Some(entry) = tally.iter_mut().find(|(l, _)| *l == label) {
            entry.1 += 1;
            entry.1
        } else {
            tally.push((label, 1));
            1
        };

        if count > most {
            most = count;
            source = Some(neighbor);
        }
    }

    source
}

fn vote_sequential(
    labels: &[i32],
    extents: &GridExtents,
    pending: &[usize],
    cancel: &AtomicBool,
) -> Result<Vec<Option<usize>>, Cancelled> {
    let mut sources = Vec::with_capacity(pending.len());
    for &idx in pending {
        if cancel.load(Ordering::Relaxed) {
            return Err(Cancelled);
        }
        sources.push(vote(labels, extents, idx));
    }
    Ok(sources)
}

fn vote_parallel(
    labels: &[i32],
    extents: &GridExtents,
    pending: &[usize],
    cancel: &AtomicBool,
) -> Result<Vec<Option<usize>>, Cancelled> {
    pending
        .par_iter()
        .map(|&idx| {
            if cancel.load(Ordering::Relaxed) {
                Err(Cancelled)
            } else {
                Ok(vote(labels, extents, idx))
            }
        })
        .collect()
}

pub(crate) fn check_labels(labels: &[i32], extents: &GridExtents) -> RemovalResult<()> {
    if labels.len() == extents.voxel_count() {
        Ok(())
    } else {
        Err(RemovalError::LabelCountMismatch {
            expected: extents.voxel_count(),
            actual: labels.len(),
        })
    }
}

pub(crate) fn check_attributes<A>(attributes: &[&mut A], extents: &GridExtents) -> RemovalResult<()>
where
    A: AttributeArray + ?Sized,
{
    for array in attributes {
        if array.tuple_count() != extents.voxel_count() {
            return Err(RemovalError::AttributeTupleMismatch {
                name: array.name().to_string(),
                expected: extents.voxel_count(),
                actual: array.tuple_count(),
            });
        }
    }
    Ok(())
}
