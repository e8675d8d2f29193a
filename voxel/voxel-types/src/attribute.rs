//! Per-voxel attribute arrays.
//!
//! Void healing copies a voxel's whole identity from a neighbour: its label
//! and every sibling attribute stored alongside it. The engine does not know
//! the element type of those siblings, so they are reached through the
//! [`AttributeArray`] capability, of which [`DataArray`] is the stock
//! implementation.

use crate::error::{TypesError, TypesResult};

/// Type-erased access to a per-voxel attribute array.
///
/// A tuple is the group of `component_count()` values belonging to one voxel.
pub trait AttributeArray: Send {
    /// Name used to match the array against an ignore list.
    fn name(&self) -> &str;

    /// Number of tuples (one per voxel).
    fn tuple_count(&self) -> usize;

    /// Number of values per tuple.
    fn component_count(&self) -> usize;

    /// Copies the tuple at `src` over the tuple at `dst`.
    ///
    /// # Panics
    ///
    /// May panic if either index is not below [`tuple_count`](Self::tuple_count).
    fn copy_tuple(&mut self, src: usize, dst: usize);
}

/// A named, component-aware attribute array backed by a flat `Vec<T>`.
///
/// # Example
///
/// ```
/// use voxel_types::{AttributeArray, DataArray};
///
/// // Three voxels with an RGB colour each.
/// let mut colors = DataArray::new(
///     "Colors",
///     3,
///     vec![255u8, 0, 0, 0, 255, 0, 0, 0, 255],
/// )
/// .unwrap();
///
/// colors.copy_tuple(0, 2);
/// assert_eq!(colors.tuple(2), Some(&[255, 0, 0][..]));
/// assert_eq!(colors.tuple_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataArray<T> {
    name: String,
    components: usize,
    values: Vec<T>,
}

impl<T> DataArray<T> {
    /// Creates an array from flat values grouped into `components`-wide tuples.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::ZeroComponents`] if `components` is zero, or
    /// [`TypesError::ComponentMismatch`] if `values.len()` is not a multiple
    /// of `components`.
    pub fn new(name: impl Into<String>, components: usize, values: Vec<T>) -> TypesResult<Self> {
        let name = name.into();
        if components == 0 {
            return Err(TypesError::ZeroComponents { name });
        }
        if values.len() % components != 0 {
            return Err(TypesError::ComponentMismatch {
                name,
                values: values.len(),
                components,
            });
        }
        Ok(Self {
            name,
            components,
            values,
        })
    }

    /// Creates a single-component array.
    ///
    /// # Example
    ///
    /// ```
    /// use voxel_types::{AttributeArray, DataArray};
    ///
    /// let phases = DataArray::from_scalars("Phases", vec![1i32, 1, 2]);
    /// assert_eq!(phases.component_count(), 1);
    /// assert_eq!(phases.tuple_count(), 3);
    /// ```
    #[must_use]
    pub fn from_scalars(name: impl Into<String>, values: Vec<T>) -> Self {
        Self {
            name: name.into(),
            components: 1,
            values,
        }
    }

    /// Values of one tuple, or `None` if `index` is out of range.
    #[must_use]
    pub fn tuple(&self, index: usize) -> Option<&[T]> {
        let start = index.checked_mul(self.components)?;
        let end = start.checked_add(self.components)?;
        self.values.get(start..end)
    }

    /// All values in tuple-major order.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Consumes the array and returns its values.
    #[must_use]
    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}

impl<T: Copy + Send> AttributeArray for DataArray<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn tuple_count(&self) -> usize {
        self.values.len() / self.components
    }

    fn component_count(&self) -> usize {
        self.components
    }

    fn copy_tuple(&mut self, src: usize, dst: usize) {
        let width = self.components;
        let start = src * width;
        self.values.copy_within(start..start + width, dst * width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_components() {
        let err = DataArray::new("Empty", 0, vec![1.0f32]).unwrap_err();
        assert!(matches!(err, TypesError::ZeroComponents { .. }));
    }

    #[test]
    fn rejects_partial_tuple() {
        let err = DataArray::new("Quats", 4, vec![0.0f32; 6]).unwrap_err();
        assert!(matches!(
            err,
            TypesError::ComponentMismatch {
                values: 6,
                components: 4,
                ..
            }
        ));
        assert!(err.to_string().contains("Quats"));
    }

    #[test]
    fn copy_moves_whole_tuple() {
        let mut euler = DataArray::new(
            "EulerAngles",
            3,
            vec![0.1f32, 0.2, 0.3, 1.1, 1.2, 1.3, 2.1, 2.2, 2.3],
        )
        .unwrap();

        euler.copy_tuple(2, 0);

        assert_eq!(euler.tuple(0), Some(&[2.1, 2.2, 2.3][..]));
        assert_eq!(euler.tuple(1), Some(&[1.1, 1.2, 1.3][..]));
        assert_eq!(euler.tuple(2), Some(&[2.1, 2.2, 2.3][..]));
    }

    #[test]
    fn copy_onto_itself_is_noop() {
        let mut ids = DataArray::from_scalars("Ids", vec![5u64, 6, 7]);
        ids.copy_tuple(1, 1);
        assert_eq!(ids.values(), &[5, 6, 7]);
    }

    #[test]
    fn tuple_out_of_range() {
        let ids = DataArray::from_scalars("Ids", vec![5u64, 6, 7]);
        assert_eq!(ids.tuple(3), None);
        assert_eq!(ids.tuple(usize::MAX), None);
    }

    #[test]
    fn works_as_trait_object() {
        let mut mask = DataArray::from_scalars("Mask", vec![true, false]);
        let array: &mut dyn AttributeArray = &mut mask;
        assert_eq!(array.name(), "Mask");
        array.copy_tuple(0, 1);
        assert_eq!(mask.into_values(), vec![true, true]);
    }
}
