//! Offset-based access to shaped values inside flat buffers

use crate::error::{Result, ShapeError};
use crate::shape::ValueShape;
use crate::types::{FlatElem, Value};
use crate::view::ShapedView;
use std::cell::Cell;
use std::ops::Range;

/// A shape together with the offset of its first entry in a flat buffer
///
/// The offset is relative to the start of the buffer: a value stored at the
/// beginning has offset zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAccessor<'s> {
    shape: &'s ValueShape,
    offset: usize,
}

impl<'s> ValueAccessor<'s> {
    pub fn new(shape: &'s ValueShape, offset: usize) -> Self {
        Self { shape, offset }
    }

    pub fn shape(&self) -> &'s ValueShape {
        self.shape
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn dof(&self) -> usize {
        self.shape.dof()
    }

    /// Range of buffer indices covered by this accessor
    ///
    /// The end saturates at `usize::MAX`; no buffer is that long, so reads and
    /// writes through such an accessor fail with a length mismatch.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset.saturating_add(self.dof())
    }

    fn check_len(&self, len: usize) -> Result<Range<usize>> {
        let end = self
            .offset
            .checked_add(self.dof())
            .ok_or(ShapeError::LengthMismatch {
                expected: usize::MAX,
                actual: len,
            })?;
        if len < end {
            return Err(ShapeError::LengthMismatch {
                expected: end,
                actual: len,
            });
        }
        Ok(self.offset..end)
    }

    /// Zero-copy view of the accessed value
    pub fn view<'a, T: FlatElem>(&self, data: &'a [Cell<T>]) -> Result<ShapedView<'a, T>>
    where
        's: 'a,
    {
        let range = self.check_len(data.len())?;
        Ok(self.shape.build_view(&data[range]))
    }

    /// Copy of the accessed value
    pub fn get<T: FlatElem>(&self, data: &[T]) -> Result<Value<T>> {
        let range = self.check_len(data.len())?;
        Value::from_flat(self.shape, &data[range])
    }

    /// Overwrite the accessed range with `value`
    ///
    /// `value` must have a shape compatible with the accessor's shape; on
    /// error the buffer is left untouched.
    pub fn set<T: FlatElem>(&self, data: &mut [T], value: &Value<T>) -> Result<()> {
        let range = self.check_len(data.len())?;
        let actual = value.valshape()?;
        let storage = self.shape.concretized(T::ELTYPE, T::COMPLEX_ELTYPE);
        if !actual.is_compatible_with(&storage) {
            return Err(ShapeError::incompatible(&actual, &storage));
        }
        let flat = value.to_flat();
        if flat.len() != range.len() {
            return Err(ShapeError::LengthMismatch {
                expected: range.len(),
                actual: flat.len(),
            });
        }
        data[range].copy_from_slice(&flat);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ElType;
    use crate::view::as_cells;
    use ndarray::array;

    #[test]
    fn access_with_offset() {
        let shape = ValueShape::array(ElType::Real, [2, 3]).unwrap();
        let acc = ValueAccessor::new(&shape, 2);
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];

        let value = acc.get(&data).unwrap();
        assert_eq!(
            value.as_array().unwrap(),
            &array![[3.0, 5.0, 7.0], [4.0, 6.0, 8.0]].into_dyn()
        );
        assert_eq!(acc.range(), 2..8);
    }

    #[test]
    fn view_writes_through() {
        let shape = ValueShape::scalar(ElType::Real);
        let acc = ValueAccessor::new(&shape, 1);
        let mut data = vec![0.0, 0.0, 0.0];
        {
            let view = acc.view(as_cells(&mut data)).unwrap();
            view.as_scalar().unwrap().set(4.5);
        }
        assert_eq!(data, vec![0.0, 4.5, 0.0]);
    }

    #[test]
    fn set_checks_shape_and_length() {
        let shape = ValueShape::array(ElType::Real, [2]).unwrap();
        let acc = ValueAccessor::new(&shape, 1);
        let mut data = vec![0.0; 3];

        acc.set(&mut data, &Value::Array(array![1.0, 2.0].into_dyn()))
            .unwrap();
        assert_eq!(data, vec![0.0, 1.0, 2.0]);

        let wrong = Value::Array(array![1.0, 2.0, 3.0].into_dyn());
        assert!(acc.set(&mut data, &wrong).is_err());
        assert_eq!(data, vec![0.0, 1.0, 2.0]);

        assert!(acc.get(&data[..2]).is_err());
    }

    #[test]
    fn set_accepts_values_stored_as_the_buffer_type() {
        let shape = ValueShape::scalar(ElType::I32);
        let acc = ValueAccessor::new(&shape, 0);
        let mut data = vec![0.0f64];
        acc.set(&mut data, &Value::Scalar(3.0)).unwrap();
        assert_eq!(data, vec![3.0]);
    }

    #[test]
    fn offsets_near_the_end_of_the_address_space() {
        let shape = ValueShape::array(ElType::Real, [4]).unwrap();
        let acc = ValueAccessor::new(&shape, usize::MAX);
        assert_eq!(acc.range(), usize::MAX..usize::MAX);

        let data = [0.0; 4];
        let err = acc.get(&data).unwrap_err();
        assert!(matches!(
            err,
            ShapeError::LengthMismatch {
                expected: usize::MAX,
                actual: 4
            }
        ));
        let mut buf = [0.0; 4];
        assert!(acc.view(as_cells(&mut buf)).is_err());
    }
}
