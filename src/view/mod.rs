//! Zero-copy views of flat buffers
//!
//! Views share a buffer through `&[Cell<T>]`, so any number of views (and
//! table views) can alias the same buffer and see each other's writes
//! immediately. Views are not `Sync`; sharing a buffer across threads goes
//! through the owner of the plain slice.

mod array;
mod record;
mod scalar;

pub use array::{ArrayView, ComplexArrayView};
pub use record::RecordView;
pub use scalar::{ComplexView, ScalarView};

use crate::error::{Result, ShapeError};
use crate::shape::{ConstValueShape, ValueShape};
use crate::types::{FlatElem, Value};
use num_complex::Complex;
use std::cell::Cell;

/// Share a mutable slice as cells
pub fn as_cells<T>(data: &mut [T]) -> &[Cell<T>] {
    Cell::from_mut(data).as_slice_of_cells()
}

/// Structured view of a flat buffer according to a shape
#[derive(Debug, Clone, Copy)]
pub enum ShapedView<'a, T: FlatElem> {
    Scalar(ScalarView<'a, T>),
    Complex(ComplexView<'a, T>),
    Array(ArrayView<'a, T>),
    ComplexArray(ComplexArrayView<'a, T>),
    Const(&'a ConstValueShape),
    Record(RecordView<'a, T>),
}

impl ValueShape {
    /// View `data` as a value of this shape
    ///
    /// `data` must have exactly `self.dof()` entries. Constant shapes accept
    /// any buffer and always yield the stored constant.
    pub fn apply<'a, T: FlatElem>(&'a self, data: &'a [Cell<T>]) -> Result<ShapedView<'a, T>> {
        if !self.is_const() && data.len() != self.dof() {
            return Err(ShapeError::LengthMismatch {
                expected: self.dof(),
                actual: data.len(),
            });
        }
        Ok(self.build_view(data))
    }

    /// Like [`apply`](Self::apply), for a plain mutable slice
    pub fn apply_mut<'a, T: FlatElem>(&'a self, data: &'a mut [T]) -> Result<ShapedView<'a, T>> {
        self.apply(as_cells(data))
    }

    /// Build a view; `data` must hold exactly `self.dof()` cells (any length for constants)
    pub(crate) fn build_view<'a, T: FlatElem>(&'a self, data: &'a [Cell<T>]) -> ShapedView<'a, T> {
        debug_assert!(self.is_const() || data.len() == self.dof());
        match self {
            ValueShape::Scalar(shape) if shape.is_complex() => ShapedView::Complex(ComplexView {
                shape,
                cells: data,
            }),
            ValueShape::Scalar(shape) => ShapedView::Scalar(ScalarView {
                shape,
                cell: &data[0],
            }),
            ValueShape::Array(shape) if shape.eltype().is_complex() => {
                ShapedView::ComplexArray(ComplexArrayView { shape, data })
            }
            ValueShape::Array(shape) => ShapedView::Array(ArrayView { shape, data }),
            ValueShape::Const(shape) => ShapedView::Const(shape),
            ValueShape::NamedTuple(shape) => ShapedView::Record(RecordView { shape, data }),
        }
    }
}

impl<'a, T: FlatElem> ShapedView<'a, T> {
    /// The shape the view was built from
    pub fn declared_shape(&self) -> ValueShape {
        match self {
            ShapedView::Scalar(v) => ValueShape::Scalar(*v.shape),
            ShapedView::Complex(v) => ValueShape::Scalar(*v.shape),
            ShapedView::Array(v) => ValueShape::Array(v.shape.clone()),
            ShapedView::ComplexArray(v) => ValueShape::Array(v.shape.clone()),
            ShapedView::Const(c) => ValueShape::Const((*c).clone()),
            ShapedView::Record(v) => ValueShape::NamedTuple(v.shape.clone()),
        }
    }

    /// Degrees of freedom covered by the view
    pub fn dof(&self) -> usize {
        self.unshape().len()
    }

    /// The backing window of the flat buffer (empty for constants)
    pub fn unshape(&self) -> &'a [Cell<T>] {
        match self {
            ShapedView::Scalar(v) => std::slice::from_ref(v.cell),
            ShapedView::Complex(v) => v.cells,
            ShapedView::Array(v) => v.data,
            ShapedView::ComplexArray(v) => v.data,
            ShapedView::Const(_) => &[],
            ShapedView::Record(v) => v.data,
        }
    }

    /// The backing window, checking that the view's value shape is `<= expected`
    pub fn unshape_as(&self, expected: &ValueShape) -> Result<&'a [Cell<T>]> {
        let actual = self
            .declared_shape()
            .refined(T::ELTYPE, T::COMPLEX_ELTYPE);
        if !actual.is_compatible_with(expected) {
            return Err(ShapeError::incompatible(&actual, expected));
        }
        Ok(self.unshape())
    }

    /// Copy the viewed value out of the buffer
    pub fn to_value(&self) -> Result<Value<T>> {
        let flat: Vec<T> = self.unshape().iter().map(Cell::get).collect();
        Value::from_flat(&self.declared_shape(), &flat)
    }

    /// Overwrite the viewed range with `value`
    ///
    /// The value must have the view's structure as stored in a buffer of `T`:
    /// same kinds, extents, field names and constants. Nothing is written if
    /// the check fails.
    pub fn assign(&self, value: &Value<T>) -> Result<()> {
        let storage = self
            .declared_shape()
            .concretized(T::ELTYPE, T::COMPLEX_ELTYPE);
        let actual = value.valshape()?;
        if !actual.is_compatible_with(&storage) {
            return Err(ShapeError::incompatible(&actual, &storage));
        }
        let flat = value.to_flat();
        let target = self.unshape();
        if flat.len() != target.len() {
            return Err(ShapeError::LengthMismatch {
                expected: target.len(),
                actual: flat.len(),
            });
        }
        for (cell, v) in target.iter().zip(flat) {
            cell.set(v);
        }
        Ok(())
    }

    /// Value of a real scalar view
    pub fn scalar(&self) -> Option<T> {
        match self {
            ShapedView::Scalar(v) => Some(v.get()),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<ScalarView<'a, T>> {
        match self {
            ShapedView::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<ComplexView<'a, T>> {
        match self {
            ShapedView::Complex(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<ArrayView<'a, T>> {
        match self {
            ShapedView::Array(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_complex_array(&self) -> Option<ComplexArrayView<'a, T>> {
        match self {
            ShapedView::ComplexArray(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_const(&self) -> Option<&'a ConstValueShape> {
        match self {
            ShapedView::Const(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<RecordView<'a, T>> {
        match self {
            ShapedView::Record(v) => Some(*v),
            _ => None,
        }
    }
}

/// Result of [`strip_scalar`]
#[derive(Debug, Clone, Copy)]
pub enum Stripped<'a, T: FlatElem> {
    Scalar(T),
    Complex(Complex<T>),
    View(ShapedView<'a, T>),
}

/// Dereference scalar views to their value; other views pass through unchanged
pub fn strip_scalar<T: FlatElem>(view: ShapedView<'_, T>) -> Stripped<'_, T> {
    match view {
        ShapedView::Scalar(v) => Stripped::Scalar(v.get()),
        ShapedView::Complex(v) => Stripped::Complex(v.get()),
        other => Stripped::View(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::ElType;
    use ndarray::array;

    #[test]
    fn complex_scalar_packs_real_then_imaginary() {
        let shape = ValueShape::scalar(ElType::Complex);
        let mut data = vec![1.0, 2.0];
        {
            let view = shape.apply_mut(&mut data).unwrap();
            let z = view.as_complex().unwrap();
            assert_eq!(z.get(), Complex::new(1.0, 2.0));
            z.set(Complex::new(-3.0, 4.0));
        }
        assert_eq!(data, vec![-3.0, 4.0]);
    }

    #[test]
    fn constant_ignores_buffer() {
        let shape = ValueShape::constant(array![[1.0, 2.0], [3.0, 4.0]].into_dyn());
        let mut data = vec![9.0, 9.0, 9.0];
        let view = shape.apply_mut(&mut data).unwrap();
        let c = view.as_const().unwrap();
        assert_eq!(
            c.value().as_real_array().unwrap(),
            &array![[1.0, 2.0], [3.0, 4.0]].into_dyn()
        );
        assert!(view.unshape().is_empty());
    }

    #[test]
    fn short_and_long_buffers_fail() {
        let shape = ValueShape::array(ElType::Real, [3]).unwrap();
        let mut short = vec![0.0; 2];
        let err = shape.apply_mut(&mut short).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Mismatch);

        let mut long = vec![0.0; 4];
        assert!(shape.apply_mut(&mut long).is_err());
    }

    #[test]
    fn unshape_as_checks_compatibility() {
        let shape = ValueShape::array(ElType::Real, [2]).unwrap();
        let mut data = vec![1.0f64, 2.0];
        let view = shape.apply_mut(&mut data).unwrap();

        let f64_shape = ValueShape::array(ElType::F64, [2]).unwrap();
        assert_eq!(view.unshape_as(&f64_shape).unwrap().len(), 2);
        assert!(view.unshape_as(&shape).is_ok());

        let int_shape = ValueShape::array(ElType::Integer, [2]).unwrap();
        let err = view.unshape_as(&int_shape).unwrap_err();
        assert!(matches!(err, ShapeError::Incompatible { .. }));

        let scalar = ValueShape::scalar(ElType::Real);
        assert!(view.unshape_as(&scalar).is_err());
    }

    #[test]
    fn assign_checks_before_writing() {
        let shape = ValueShape::named([
            ("a", ValueShape::scalar(ElType::Real)),
            ("c", ValueShape::constant(5i64)),
        ])
        .unwrap();
        let mut data = vec![1.0];
        {
            let view = shape.apply_mut(&mut data).unwrap();
            let bad: Value<f64> = Value::Record(vec![
                ("a".into(), Value::Scalar(2.0)),
                ("c".into(), Value::Const(6i64.into())),
            ]);
            assert!(view.assign(&bad).is_err());
            assert_eq!(view.as_record().unwrap().get_scalar("a"), Some(1.0));

            let good: Value<f64> = Value::Record(vec![
                ("a".into(), Value::Scalar(2.0)),
                ("c".into(), Value::Const(5i64.into())),
            ]);
            view.assign(&good).unwrap();
            assert_eq!(view.to_value().unwrap(), good);
        }
        assert_eq!(data, vec![2.0]);
    }

    #[test]
    fn strip_scalar_only_touches_scalars() {
        let shape = ValueShape::named([
            ("a", ValueShape::scalar(ElType::Real)),
            ("b", ValueShape::array(ElType::Real, [2]).unwrap()),
        ])
        .unwrap();
        let mut data = vec![1.0, 2.0, 3.0];
        let view = shape.apply_mut(&mut data).unwrap();
        let rec = view.as_record().unwrap();

        assert!(matches!(strip_scalar(rec.field("a").unwrap()), Stripped::Scalar(v) if v == 1.0));
        assert!(matches!(
            strip_scalar(rec.field("b").unwrap()),
            Stripped::View(ShapedView::Array(_))
        ));
        assert!(matches!(strip_scalar(view), Stripped::View(ShapedView::Record(_))));
    }
}
