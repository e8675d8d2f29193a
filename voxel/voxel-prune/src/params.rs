//! Configuration for feature removal and void healing.

/// What deactivation writes into voxels of removed features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillMode {
    /// Hand the voxels to the background feature (label `0`).
    #[default]
    Zero,

    /// Mark the voxels unassigned (label `-1`) so void healing can fill them.
    MarkForHealing,
}

/// Tuning for the void-healing loop.
///
/// # Example
///
/// ```
/// use voxel_prune::HealParams;
///
/// let params = HealParams::default();
/// assert!(params.parallel);
///
/// let params = HealParams::sequential();
/// assert!(!params.parallel);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HealParams {
    /// Whether to vote in parallel (via rayon).
    ///
    /// Results are identical either way; only the vote sub-phase of each pass
    /// is spread across threads.
    /// Default: `true`
    pub parallel: bool,

    /// Minimum number of pending voxels before a pass votes in parallel.
    ///
    /// Small passes are cheaper on one thread.
    /// Default: `4096`
    pub parallel_threshold: usize,
}

impl Default for HealParams {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 4096,
        }
    }
}

impl HealParams {
    /// Create params that always vote on the calling thread.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Default::default()
        }
    }

    /// Set whether to vote in parallel.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the pending-voxel threshold for parallel voting.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub(crate) fn votes_in_parallel(&self, pending: usize) -> bool {
        self.parallel && pending >= self.parallel_threshold
    }
}

/// Configuration for [`remove_flagged_features`](crate::remove_flagged_features).
///
/// # Example
///
/// ```
/// use voxel_prune::{FillMode, RemovalParams};
///
/// // Defaults: removed voxels become background.
/// let params = RemovalParams::default();
/// assert_eq!(params.fill_mode(), FillMode::Zero);
///
/// // Heal the holes, but leave the "Mask" array untouched.
/// let params = RemovalParams::with_healing().with_ignored_array("Mask");
/// assert_eq!(params.fill_mode(), FillMode::MarkForHealing);
/// assert_eq!(params.ignored_arrays, vec!["Mask".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RemovalParams {
    /// Whether to heal the voids left by removed features.
    ///
    /// When `false`, removed voxels are given to the background feature.
    /// Default: `false`
    pub fill_removed_features: bool,

    /// Names of sibling attribute arrays that keep their original values
    /// while voids are healed.
    ///
    /// Default: empty
    pub ignored_arrays: Vec<String>,

    /// Tuning for the healing loop.
    pub heal: HealParams,
}

impl RemovalParams {
    /// Create params that only remove features, giving their voxels to the
    /// background.
    #[must_use]
    pub fn removal_only() -> Self {
        Self::default()
    }

    /// Create params that remove features and heal the resulting voids.
    #[must_use]
    pub fn with_healing() -> Self {
        Self {
            fill_removed_features: true,
            ..Default::default()
        }
    }

    /// Set whether to heal removed voxels.
    #[must_use]
    pub fn with_fill_removed_features(mut self, fill: bool) -> Self {
        self.fill_removed_features = fill;
        self
    }

    /// Add an attribute array name to the ignore list.
    #[must_use]
    pub fn with_ignored_array(mut self, name: impl Into<String>) -> Self {
        self.ignored_arrays.push(name.into());
        self
    }

    /// Set the healing parameters.
    #[must_use]
    pub fn with_heal_params(mut self, heal: HealParams) -> Self {
        self.heal = heal;
        self
    }

    /// The fill mode deactivation runs with.
    #[must_use]
    pub fn fill_mode(&self) -> FillMode {
        if self.fill_removed_features {
            FillMode::MarkForHealing
        } else {
            FillMode::Zero
        }
    }
}
