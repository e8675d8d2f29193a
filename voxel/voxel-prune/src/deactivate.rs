//! Feature deactivation.
//!
//! Derives which features survive removal and stamps the voxels of removed
//! features with either the background label or the unassigned marker.

use tracing::{debug, warn};
use voxel_types::{BACKGROUND_FEATURE, UNASSIGNED};

use crate::error::{RemovalError, RemovalResult};
use crate::params::FillMode;

/// Outcome of deactivating flagged features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deactivation {
    /// Per-feature survival flags, forwarded unchanged to compaction.
    ///
    /// `active_mask[0]` is always `true`.
    pub active_mask: Vec<bool>,
    /// Number of voxels whose label was overwritten.
    pub voxels_invalidated: usize,
}

impl Deactivation {
    /// Number of features in the mask (background included).
    #[must_use]
    pub fn total_features(&self) -> usize {
        self.active_mask.len()
    }

    /// Number of features that were removed.
    #[must_use]
    pub fn features_removed(&self) -> usize {
        self.active_mask.iter().filter(|&&active| !active).count()
    }
}

/// Derive the active-feature mask from a flagged-feature mask.
///
/// The background feature is always active; every other feature is active
/// exactly when it is not flagged.
///
/// # Errors
///
/// Returns [`RemovalError::EmptyFeatureMask`] for an empty mask, and
/// [`RemovalError::AllFeaturesFlagged`] if no feature other than the
/// background would survive.
///
/// # Example
///
/// ```
/// use voxel_prune::active_feature_mask;
///
/// let active = active_feature_mask(&[false, true, false, true]).unwrap();
/// assert_eq!(active, vec![true, false, true, false]);
///
/// assert!(active_feature_mask(&[false, true, true]).is_err());
/// ```
pub fn active_feature_mask(flagged: &[bool]) -> RemovalResult<Vec<bool>> {
    if flagged.is_empty() {
        return Err(RemovalError::EmptyFeatureMask);
    }

    let mut active = vec![true; flagged.len()];
    let mut any_survivor = false;
    for (feature, &is_flagged) in flagged.iter().enumerate().skip(1) {
        if is_flagged {
            active[feature] = false;
        } else {
            any_survivor = true;
        }
    }

    if !any_survivor {
        warn!(
            total_features = flagged.len(),
            "Every feature is flagged; aborting removal"
        );
        return Err(RemovalError::AllFeaturesFlagged);
    }

    Ok(active)
}

/// Deactivate flagged features in a label array.
///
/// Every voxel whose feature is flagged is overwritten with `0` for
/// [`FillMode::Zero`] or `-1` for [`FillMode::MarkForHealing`]. Voxels that
/// are already unassigned are left alone.
///
/// The mask and every label are checked before anything is written, so on
/// error the label array is unchanged.
///
/// # Errors
///
/// Returns the errors of [`active_feature_mask`], and
/// [`RemovalError::LabelOutOfRange`] if a label is below `-1` or not less
/// than the number of features.
///
/// # Example
///
/// ```
/// use voxel_prune::{deactivate_flagged_features, FillMode};
///
/// let mut labels = vec![0, 1, 2, 2, 1];
/// let result = deactivate_flagged_features(
///     &mut labels,
///     &[false, false, true],
///     FillMode::MarkForHealing,
/// )
/// .unwrap();
///
/// assert_eq!(labels, vec![0, 1, -1, -1, 1]);
/// assert_eq!(result.voxels_invalidated, 2);
/// assert_eq!(result.features_removed(), 1);
/// ```
pub fn deactivate_flagged_features(
    labels: &mut [i32],
    flagged: &[bool],
    fill_mode: FillMode,
) -> RemovalResult<Deactivation> {
    let active_mask = active_feature_mask(flagged)?;
    check_label_range(labels, active_mask.len())?;

    let fill = match fill_mode {
        FillMode::Zero => BACKGROUND_FEATURE,
        FillMode::MarkForHealing => UNASSIGNED,
    };

    let mut voxels_invalidated = 0;
    for label in labels.iter_mut() {
        if let Ok(feature) = usize::try_from(*label) {
            if !active_mask[feature] {
                *label = fill;
                voxels_invalidated += 1;
            }
        }
    }

    debug!(
        voxels = labels.len(),
        voxels_invalidated,
        fill = ?fill_mode,
        "Deactivated flagged features"
    );

    Ok(Deactivation {
        active_mask,
        voxels_invalidated,
    })
}

/// Reject labels that cannot index the feature mask.
fn check_label_range(labels: &[i32], total_features: usize) -> RemovalResult<()> {
    let out_of_range = labels.iter().enumerate().find(|&(_, &label)| {
        label < UNASSIGNED || usize::try_from(label).is_ok_and(|f| f >= total_features)
    });

    match out_of_range {
        Some((index, &label)) => Err(RemovalError::LabelOutOfRange {
            index,
            label,
            total_features,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_always_active() {
        let active = active_feature_mask(&[true, false]).unwrap();
        assert_eq!(active, vec![true, true]);
    }

    #[test]
    fn mask_mirrors_flags() {
        let flagged = [false, false, true, false, true];
        let active = active_feature_mask(&flagged).unwrap();
        assert_eq!(active.len(), flagged.len());
        for i in 1..flagged.len() {
            assert_eq!(active[i], !flagged[i]);
        }
    }

    #[test]
    fn all_flagged_fails() {
        assert!(matches!(
            active_feature_mask(&[false, true, true]),
            Err(RemovalError::AllFeaturesFlagged)
        ));
    }

    #[test]
    fn background_only_mask_fails() {
        assert!(matches!(
            active_feature_mask(&[false]),
            Err(RemovalError::AllFeaturesFlagged)
        ));
    }

    #[test]
    fn empty_mask_fails() {
        assert!(matches!(
            active_feature_mask(&[]),
            Err(RemovalError::EmptyFeatureMask)
        ));
    }

    #[test]
    fn zero_fill_hands_voxels_to_background() {
        let mut labels = vec![1, 2, 3, 2, 0];
        let result =
            deactivate_flagged_features(&mut labels, &[false, false, true, false], FillMode::Zero)
                .unwrap();

        assert_eq!(labels, vec![1, 0, 3, 0, 0]);
        assert_eq!(result.voxels_invalidated, 2);
        assert_eq!(result.active_mask, vec![true, true, false, true]);
        assert_eq!(result.total_features(), 4);
    }

    #[test]
    fn existing_unassigned_voxels_are_kept() {
        let mut labels = vec![-1, 1, 2];
        let result =
            deactivate_flagged_features(&mut labels, &[false, false, true], FillMode::Zero)
                .unwrap();

        assert_eq!(labels, vec![-1, 1, 0]);
        assert_eq!(result.voxels_invalidated, 1);
    }

    #[test]
    fn all_flagged_leaves_labels_untouched() {
        let mut labels = vec![1, 2, 1, 0];
        let before = labels.clone();
        let err =
            deactivate_flagged_features(&mut labels, &[false, true, true], FillMode::Zero)
                .unwrap_err();

        assert!(matches!(err, RemovalError::AllFeaturesFlagged));
        assert_eq!(labels, before);
    }

    #[test]
    fn out_of_range_label_fails_before_writing() {
        let mut labels = vec![2, 1, 5];
        let before = labels.clone();
        let err = deactivate_flagged_features(
            &mut labels,
            &[false, false, true],
            FillMode::MarkForHealing,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            RemovalError::LabelOutOfRange {
                index: 2,
                label: 5,
                total_features: 3
            }
        ));
        assert_eq!(labels, before);
    }

    #[test]
    fn label_below_unassigned_fails() {
        let mut labels = vec![1, -4];
        assert!(matches!(
            deactivate_flagged_features(&mut labels, &[false, false], FillMode::Zero),
            Err(RemovalError::LabelOutOfRange { label: -4, .. })
        ));
    }

    #[test]
    fn nothing_flagged_is_noop() {
        let mut labels = vec![0, 1, 2];
        let result =
            deactivate_flagged_features(&mut labels, &[false, false, false], FillMode::Zero)
                .unwrap();

        assert_eq!(labels, vec![0, 1, 2]);
        assert_eq!(result.voxels_invalidated, 0);
        assert_eq!(result.features_removed(), 0);
    }
}
