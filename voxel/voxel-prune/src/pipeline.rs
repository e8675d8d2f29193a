//! End-to-end removal: deactivate, heal, compact.

use std::sync::atomic::AtomicBool;

use tracing::info;
use voxel_types::GridExtents;

use crate::attributes::AttributeSet;
use crate::compact::FeatureCompactor;
use crate::deactivate::deactivate_flagged_features;
use crate::error::RemovalResult;
use crate::heal::{HealOutcome, check_attributes, check_labels, heal_voids_with_params};
use crate::params::RemovalParams;

/// Result of a removal run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemovalSummary {
    /// Number of features before removal, background included.
    pub total_features: usize,
    /// Number of features removed.
    pub features_removed: usize,
    /// Number of voxels whose label was overwritten by deactivation.
    pub voxels_invalidated: usize,
    /// Healing outcome, when removed voxels were healed.
    pub heal: Option<HealOutcome>,
    /// Whether healing was cancelled.
    pub cancelled: bool,
}

impl RemovalSummary {
    /// Check if the run changed any label.
    #[must_use]
    pub fn had_changes(&self) -> bool {
        self.voxels_invalidated > 0 || self.features_removed > 0
    }

    /// Voxels left unassigned after healing (zero when not healing).
    #[must_use]
    pub fn unresolved(&self) -> usize {
        self.heal.as_ref().map_or(0, |heal| heal.unresolved)
    }
}

impl std::fmt::Display for RemovalSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Removal: {} of {} features removed, {} voxels invalidated",
            self.features_removed, self.total_features, self.voxels_invalidated
        )?;
        if let Some(heal) = &self.heal {
            write!(f, "; {heal}")?;
        }
        Ok(())
    }
}

/// Remove flagged features, optionally heal the voids they leave, and hand
/// the result to `compactor`.
///
/// Steps:
///
/// 1. Check that `labels` covers the grid and, when healing, that every
///    propagated attribute has one tuple per voxel.
/// 2. Deactivate flagged features. Their voxels become background, or `-1`
///    when [`RemovalParams::fill_removed_features`] is set.
/// 3. When healing, fill the `-1` voxels from their neighbours, copying every
///    attribute not listed in [`RemovalParams::ignored_arrays`].
/// 4. Call `compactor` with the active mask.
///
/// Cancellation and unreachable voids are not errors: compaction still runs
/// and the summary reports them.
///
/// # Errors
///
/// Any validation error, [`RemovalError::AllFeaturesFlagged`](crate::RemovalError::AllFeaturesFlagged),
/// or a compactor failure. Validation and the all-flagged check fail before
/// any label is written, and in those cases the compactor is not called.
///
/// # Example
///
/// ```
/// use std::sync::atomic::AtomicBool;
/// use voxel_prune::{AttributeSet, RemovalParams, RenumberCompactor, remove_flagged_features};
/// use voxel_types::{DataArray, GridExtents};
///
/// let extents = GridExtents::new(4, 1, 1).unwrap();
/// let mut labels = vec![1, 1, 2, 2];
/// let mut phases = DataArray::from_scalars("Phases", vec![10u8, 10, 20, 20]);
///
/// let mut attributes = AttributeSet::new();
/// attributes.push(&mut phases);
///
/// let mut compactor = RenumberCompactor::default();
/// let summary = remove_flagged_features(
///     &mut labels,
///     &[false, false, true],
///     &extents,
///     &mut attributes,
///     &RemovalParams::with_healing(),
///     &mut compactor,
///     &AtomicBool::new(false),
/// )
/// .unwrap();
///
/// assert_eq!(labels, vec![1, 1, 1, 1]);
/// assert_eq!(phases.values(), &[10; 4]);
/// assert_eq!(summary.features_removed, 1);
/// assert_eq!(summary.unresolved(), 0);
/// ```
pub fn remove_flagged_features<C>(
    labels: &mut [i32],
    flagged: &[bool],
    extents: &GridExtents,
    attributes: &mut AttributeSet<'_>,
    params: &RemovalParams,
    compactor: &mut C,
    cancel: &AtomicBool,
) -> RemovalResult<RemovalSummary>
where
    C: FeatureCompactor + ?Sized,
{
    check_labels(labels, extents)?;

    let mut targets = if params.fill_removed_features {
        attributes.propagation_targets(&params.ignored_arrays)
    } else {
        Vec::new()
    };
    check_attributes(&targets, extents)?;

    info!(
        voxels = labels.len(),
        total_features = flagged.len(),
        fill = params.fill_removed_features,
        attributes = targets.len(),
        "Removing flagged features"
    );

    let deactivation = deactivate_flagged_features(labels, flagged, params.fill_mode())?;

    let heal = if params.fill_removed_features {
        Some(heal_voids_with_params(
            labels,
            &mut targets,
            extents,
            cancel,
            &params.heal,
        )?)
    } else {
        None
    };
    let cancelled = heal.as_ref().is_some_and(|heal| heal.cancelled);

    compactor.compact(
        &deactivation.active_mask,
        labels,
        deactivation.total_features(),
    )?;

    let summary = RemovalSummary {
        total_features: deactivation.total_features(),
        features_removed: deactivation.features_removed(),
        voxels_invalidated: deactivation.voxels_invalidated,
        heal,
        cancelled,
    };

    info!(
        features_removed = summary.features_removed,
        voxels_invalidated = summary.voxels_invalidated,
        unresolved = summary.unresolved(),
        cancelled,
        "Feature removal complete"
    );

    Ok(summary)
}
