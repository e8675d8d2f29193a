//! Label validation and health reporting.
//!
//! Checks a label array for voxels that downstream steps cannot handle:
//! residual unassigned voxels and labels outside the feature table.

use voxel_types::UNASSIGNED;

/// Report of label validation results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelReport {
    /// Total number of voxels.
    pub voxel_count: usize,
    /// Number of voxels owned by the background feature.
    pub background_count: usize,
    /// Number of voxels still unassigned (`-1`).
    pub unassigned_count: usize,
    /// Number of voxels whose label is below `-1` or not a known feature.
    pub out_of_range_count: usize,
    /// Voxels per feature, indexed by feature id (background included).
    pub feature_voxel_counts: Vec<usize>,
}

impl LabelReport {
    /// Check if every voxel carries a valid feature label.
    #[must_use]
    pub fn is_fully_assigned(&self) -> bool {
        self.unassigned_count == 0 && self.out_of_range_count == 0
    }

    /// Check if the labels have any issues.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.is_fully_assigned()
    }

    /// Non-background features that own no voxels.
    #[must_use]
    pub fn empty_features(&self) -> Vec<usize> {
        self.feature_voxel_counts
            .iter()
            .enumerate()
            .skip(1)
            .filter(|&(_, &count)| count == 0)
            .map(|(feature, _)| feature)
            .collect()
    }
}

impl std::fmt::Display for LabelReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Label Report:")?;
        writeln!(f, "  Voxels: {}", self.voxel_count)?;
        writeln!(f, "  Features: {}", self.feature_voxel_counts.len())?;
        writeln!(f, "  Background voxels: {}", self.background_count)?;
        writeln!(
            f,
            "  Fully assigned: {}",
            if self.is_fully_assigned() { "Yes" } else { "No" }
        )?;

        if self.has_issues() {
            writeln!(f)?;
            writeln!(f, "  Issues:")?;
            if self.unassigned_count > 0 {
                writeln!(f, "    Unassigned voxels: {}", self.unassigned_count)?;
            }
            if self.out_of_range_count > 0 {
                writeln!(f, "    Out-of-range labels: {}", self.out_of_range_count)?;
            }
        }

        Ok(())
    }
}

/// Validate a label array against a feature table of `total_features`
/// entries.
///
/// # Example
///
/// ```
/// use voxel_prune::validate_labels;
///
/// let report = validate_labels(&[0, 1, 1, -1, 3], 3);
/// assert_eq!(report.unassigned_count, 1);
/// assert_eq!(report.out_of_range_count, 1);
/// assert_eq!(report.feature_voxel_counts, vec![1, 2, 0]);
/// assert_eq!(report.empty_features(), vec![2]);
/// assert!(report.has_issues());
/// ```
#[must_use]
pub fn validate_labels(labels: &[i32], total_features: usize) -> LabelReport {
    let mut report = LabelReport {
        voxel_count: labels.len(),
        feature_voxel_counts: vec![0; total_features],
        ..Default::default()
    };

    for &label in labels {
        if label == UNASSIGNED {
            report.unassigned_count += 1;
            continue;
        }
        match usize::try_from(label)
            .ok()
            .and_then(|feature| report.feature_voxel_counts.get_mut(feature))
        {
            Some(count) => *count += 1,
            None => report.out_of_range_count += 1,
        }
    }

    report.background_count = report.feature_voxel_counts.first().copied().unwrap_or(0);

    report
}

/// Linear indices of every unassigned voxel, in increasing order.
#[must_use]
pub fn unassigned_voxels(labels: &[i32]) -> Vec<usize> {
    labels
        .iter()
        .enumerate()
        .filter(|&(_, &label)| label == UNASSIGNED)
        .map(|(idx, _)| idx)
        .collect()
}
