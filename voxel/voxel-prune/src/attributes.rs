//! Sibling attribute arrays carried along by void healing.

use hashbrown::HashSet;
use tracing::debug;
use voxel_types::AttributeArray;

/// The attribute arrays that share the label array's voxel indexing.
///
/// Arrays keep their insertion order; healing copies tuples in that order.
///
/// # Example
///
/// ```
/// use voxel_prune::AttributeSet;
/// use voxel_types::DataArray;
///
/// let mut phases = DataArray::from_scalars("Phases", vec![1u8, 2, 3]);
/// let mut mask = DataArray::from_scalars("Mask", vec![true, false, true]);
///
/// let mut set = AttributeSet::new();
/// set.push(&mut phases);
/// set.push(&mut mask);
///
/// let targets = set.propagation_targets(&["Mask".to_string()]);
/// assert_eq!(targets.len(), 1);
/// assert_eq!(targets[0].name(), "Phases");
/// ```
#[derive(Default)]
pub struct AttributeSet<'a> {
    arrays: Vec<&'a mut dyn AttributeArray>,
}

impl<'a> AttributeSet<'a> {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self { arrays: Vec::new() }
    }

    /// Add an array to the set.
    pub fn push(&mut self, array: &'a mut dyn AttributeArray) {
        self.arrays.push(array);
    }

    /// Number of arrays in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    /// Check if the set has no arrays.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    /// Names of the arrays, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.arrays.iter().map(|array| array.name())
    }

    /// The arrays healing should copy tuples in, skipping any named in
    /// `ignored`.
    ///
    /// Ignored names that match no array are not an error.
    pub fn propagation_targets(
        &mut self,
        ignored: &[String],
    ) -> Vec<&mut (dyn AttributeArray + 'a)> {
        let ignored: HashSet<&str> = ignored.iter().map(String::as_str).collect();

        for name in &ignored {
            if !self.arrays.iter().any(|array| array.name() == *name) {
                debug!(name, "Ignored attribute array not present");
            }
        }

        self.arrays
            .iter_mut()
            .filter(|array| !ignored.contains(array.name()))
            .map(|array| &mut **array)
            .collect()
    }
}

impl std::fmt::Debug for AttributeSet<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
