//! Feature label conventions.

/// Label of the permanent background feature.
pub const BACKGROUND_FEATURE: i32 = 0;

/// Label of a voxel waiting to be healed.
pub const UNASSIGNED: i32 = -1;

/// Checks whether a label names a feature (background included).
///
/// # Example
///
/// ```
/// use voxel_types::{is_assigned, UNASSIGNED};
///
/// assert!(is_assigned(0));
/// assert!(is_assigned(7));
/// assert!(!is_assigned(UNASSIGNED));
/// ```
#[inline]
#[must_use]
pub const fn is_assigned(label: i32) -> bool {
    label >= BACKGROUND_FEATURE
}
