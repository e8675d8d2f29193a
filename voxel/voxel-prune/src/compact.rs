//! Feature compaction hook.
//!
//! After removal the feature table still has entries for the removed
//! features. Renumbering the survivors and shrinking feature-level data is
//! the host's business; the pipeline only hands over the active mask.

use crate::error::{RemovalError, RemovalResult};

/// Renumbers surviving features after removal.
///
/// Implementors receive the active-feature mask (`true` = keep), the label
/// array so it can be rewritten to the compacted numbering, and the feature
/// count before removal. Unassigned labels (`-1`) may remain in `labels` and
/// must be preserved.
///
/// Closures with the matching signature implement this trait.
///
/// # Example
///
/// ```
/// use voxel_prune::{FeatureCompactor, RemovalResult};
///
/// let mut calls = 0;
/// let mut compactor = |mask: &[bool], _labels: &mut [i32], total: usize| -> RemovalResult<()> {
///     assert_eq!(mask.len(), total);
///     calls += 1;
///     Ok(())
/// };
///
/// compactor.compact(&[true, false], &mut [0, 0], 2).unwrap();
/// assert_eq!(calls, 1);
/// ```
pub trait FeatureCompactor {
    /// Compact the feature set down to the features marked active.
    ///
    /// # Errors
    ///
    /// Implementations report failure as
    /// [`RemovalError::CompactionFailed`](RemovalError::CompactionFailed).
    fn compact(
        &mut self,
        active_mask: &[bool],
        labels: &mut [i32],
        total_features: usize,
    ) -> RemovalResult<()>;
}

impl<F> FeatureCompactor for F
where
    F: FnMut(&[bool], &mut [i32], usize) -> RemovalResult<()>,
{
    fn compact(
        &mut self,
        active_mask: &[bool],
        labels: &mut [i32],
        total_features: usize,
    ) -> RemovalResult<()> {
        self(active_mask, labels, total_features)
    }
}

/// Compactor that renumbers surviving features densely, in their original
/// order, and rewrites the labels to match.
///
/// The background keeps id `0`. After [`compact`](FeatureCompactor::compact),
/// [`new_ids`](Self::new_ids) maps each old feature id to its new id, or
/// `None` for removed features.
///
/// # Example
///
/// ```
/// use voxel_prune::{FeatureCompactor, RenumberCompactor};
///
/// let mut labels = vec![0, 1, 3, -1, 3];
/// let mut compactor = RenumberCompactor::default();
/// compactor
///     .compact(&[true, true, false, true], &mut labels, 4)
///     .unwrap();
///
/// assert_eq!(labels, vec![0, 1, 2, -1, 2]);
/// assert_eq!(compactor.new_ids(), &[Some(0), Some(1), None, Some(2)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RenumberCompactor {
    new_ids: Vec<Option<i32>>,
}

impl RenumberCompactor {
    /// Old-to-new feature id map from the last compaction.
    #[must_use]
    pub fn new_ids(&self) -> &[Option<i32>] {
        &self.new_ids
    }

    /// Number of features after the last compaction, background included.
    #[must_use]
    pub fn surviving_features(&self) -> usize {
        self.new_ids.iter().flatten().count()
    }
}

impl FeatureCompactor for RenumberCompactor {
    fn compact(
        &mut self,
        active_mask: &[bool],
        labels: &mut [i32],
        total_features: usize,
    ) -> RemovalResult<()> {
        if active_mask.len() != total_features {
            return Err(RemovalError::CompactionFailed {
                reason: format!(
                    "mask has {} entries for {total_features} features",
                    active_mask.len()
                ),
            });
        }

        let mut next = 0i32;
        self.new_ids = active_mask
            .iter()
            .map(|&active| {
                active.then(|| {
                    let id = next;
                    next += 1;
                    id
                })
            })
            .collect();

        let stale = labels
            .iter()
            .filter_map(|&label| usize::try_from(label).ok())
            .find(|&old| !matches!(self.new_ids.get(old), Some(Some(_))));
        if let Some(old) = stale {
            return Err(RemovalError::CompactionFailed {
                reason: format!("label {old} refers to a removed or unknown feature"),
            });
        }

        for label in labels.iter_mut() {
            if let Some(&Some(new)) = usize::try_from(*label)
                .ok()
                .and_then(|old| self.new_ids.get(old))
            {
                *label = new;
            }
        }

        Ok(())
    }
}
