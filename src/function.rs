//! Shape queries for functions of structured values

use crate::accessor::ValueAccessor;
use crate::alloc::Shaped;
use crate::error::{Result, ShapeError};
use crate::shape::ValueShape;
use crate::types::{FlatElem, Value};
use crate::view::ShapedView;

/// Things that know the shape of the value they hold or view
pub trait ValShape {
    /// Shape of the value, with abstract element types narrowed to the
    /// buffer's type where that type fits
    fn valshape(&self) -> ValueShape;
}

impl<T: FlatElem> ValShape for ShapedView<'_, T> {
    fn valshape(&self) -> ValueShape {
        self.declared_shape()
            .refined(T::ELTYPE, T::COMPLEX_ELTYPE)
    }
}

impl<T: FlatElem> ValShape for Shaped<T> {
    fn valshape(&self) -> ValueShape {
        self.shape().refined(T::ELTYPE, T::COMPLEX_ELTYPE)
    }
}

impl ValShape for ValueAccessor<'_> {
    fn valshape(&self) -> ValueShape {
        self.shape().clone()
    }
}

/// Things whose input variates have a fixed shape
pub trait VarShape {
    fn varshape(&self) -> &ValueShape;

    /// Number of flat entries of one variate
    fn vardof(&self) -> usize {
        self.varshape().dof()
    }
}

impl VarShape for ValueShape {
    fn varshape(&self) -> &ValueShape {
        self
    }
}

/// A function of a structured value, callable on flat buffers
///
/// The input buffer is viewed through the function's varshape; the result is
/// optionally checked against a declared valshape and flattened.
#[derive(Debug, Clone)]
pub struct ShapedFn<F> {
    f: F,
    varshape: ValueShape,
    valshape: Option<ValueShape>,
}

impl<F> ShapedFn<F> {
    pub fn new(varshape: ValueShape, f: F) -> Self {
        Self {
            f,
            varshape,
            valshape: None,
        }
    }

    /// Require results to compare `<=` `valshape`
    pub fn with_valshape(mut self, valshape: ValueShape) -> Self {
        self.valshape = Some(valshape);
        self
    }

    pub fn valshape(&self) -> Option<&ValueShape> {
        self.valshape.as_ref()
    }

    /// Call the function on a structured view
    pub fn call<'v, T>(&self, view: ShapedView<'v, T>) -> Result<Value<T>>
    where
        T: FlatElem,
        F: Fn(ShapedView<'v, T>) -> Value<T>,
    {
        let result = (self.f)(view);
        if let Some(expected) = &self.valshape {
            let actual = result.valshape()?;
            if !actual.is_compatible_with(expected) {
                return Err(ShapeError::incompatible(&actual, expected));
            }
        }
        Ok(result)
    }

    /// Call the function on flat input, returning flat output
    pub fn call_flat<T>(&self, x: &mut [T]) -> Result<Vec<T>>
    where
        T: FlatElem,
        F: for<'v> Fn(ShapedView<'v, T>) -> Value<T>,
    {
        let view = self.varshape.apply_mut(x)?;
        Ok(self.call(view)?.to_flat())
    }
}

impl<F> VarShape for ShapedFn<F> {
    fn varshape(&self) -> &ValueShape {
        &self.varshape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::ElType;

    fn params() -> ValueShape {
        ValueShape::named([
            ("a", ValueShape::scalar(ElType::Real)),
            ("b", ValueShape::array(ElType::Real, [2]).unwrap()),
            ("c", ValueShape::constant(2.0)),
        ])
        .unwrap()
    }

    fn weighted_sum(v: ShapedView<'_, f64>) -> Value<f64> {
        let rec = v.as_record().unwrap();
        let b = rec.field("b").unwrap().as_array().unwrap();
        let c = rec.field("c").unwrap().as_const().unwrap().value().as_real().unwrap();
        let a = rec.get_scalar("a").unwrap();
        Value::Scalar(c * a + b.get(&[0]).unwrap() + b.get(&[1]).unwrap())
    }

    fn scale_b(v: ShapedView<'_, f64>) -> Value<f64> {
        let b = v.as_record().unwrap().field("b").unwrap().to_value().unwrap();
        match b {
            Value::Array(a) => Value::Array(a * 10.0),
            other => other,
        }
    }

    #[test]
    fn call_flat_shapes_input_and_flattens_output() {
        let f = ShapedFn::new(params(), weighted_sum).with_valshape(ValueShape::scalar(ElType::Real));
        assert_eq!(f.vardof(), 3);
        let mut x = vec![1.0, 2.0, 3.0];
        assert_eq!(f.call_flat(&mut x).unwrap(), vec![7.0]);

        let mut short = vec![1.0];
        assert_eq!(f.call_flat(&mut short).unwrap_err().kind(), ErrorKind::Mismatch);

        let g = ShapedFn::new(params(), scale_b);
        assert_eq!(g.call_flat(&mut x).unwrap(), vec![20.0, 30.0]);
    }

    #[test]
    fn result_checked_against_valshape() {
        let f = ShapedFn::new(params(), weighted_sum)
            .with_valshape(ValueShape::scalar(ElType::Integer));
        let mut x = vec![1.0, 2.0, 3.0];
        let err = f.call_flat(&mut x).unwrap_err();
        assert!(matches!(err, ShapeError::Incompatible { .. }));
    }

    #[test]
    fn valshape_concretizes_element_types() {
        let shape = params();
        let mut x = vec![0.0f32; 3];
        let view = shape.apply_mut(&mut x).unwrap();
        let expected = ValueShape::named([
            ("a", ValueShape::scalar(ElType::F32)),
            ("b", ValueShape::array(ElType::F32, [2]).unwrap()),
            ("c", ValueShape::constant(2.0)),
        ])
        .unwrap();
        assert_eq!(view.valshape(), expected);
        assert!(view.valshape() <= shape);

        let accessor = shape.as_named_tuple().unwrap().accessor("b").unwrap();
        assert_eq!(accessor.valshape(), ValueShape::array(ElType::Real, [2]).unwrap());
        assert_eq!(shape.vardof(), 3);
    }
}
