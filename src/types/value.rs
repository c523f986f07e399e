//! Owned structured values
//!
//! A [`Value`] is a copy of what a view shows. It is used to read a view out,
//! to assign a whole view at once, and to flatten function results.

use super::{ConstValue, FlatElem};
use crate::error::{Result, ShapeError};
use crate::shape::ValueShape;
use ndarray::{ArrayD, IxDyn, ShapeBuilder};
use num_complex::Complex;

/// Owned value with elements of flat type `T`
#[derive(Debug, Clone, PartialEq)]
pub enum Value<T> {
    Scalar(T),
    Complex(Complex<T>),
    Array(ArrayD<T>),
    ComplexArray(ArrayD<Complex<T>>),
    Const(ConstValue),
    Record(Vec<(String, Value<T>)>),
}

impl<T: FlatElem> Value<T> {
    /// Concrete shape of this value
    ///
    /// Fails for records that repeat a field name.
    pub fn valshape(&self) -> Result<ValueShape> {
        match self {
            Value::Scalar(_) => Ok(ValueShape::scalar(T::ELTYPE)),
            Value::Complex(_) => Ok(ValueShape::scalar(T::COMPLEX_ELTYPE)),
            Value::Array(a) => ValueShape::array(T::ELTYPE, a.shape().to_vec()),
            Value::ComplexArray(a) => ValueShape::array(T::COMPLEX_ELTYPE, a.shape().to_vec()),
            Value::Const(c) => Ok(ValueShape::constant(c.clone())),
            Value::Record(entries) => ValueShape::named(
                entries
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), v.valshape()?)))
                    .collect::<Result<Vec<_>>>()?,
            ),
        }
    }

    /// Read a value of `shape` from flat data of exactly `shape.dof()` entries
    ///
    /// Arrays are read in column-major order, complex entries real part first.
    pub fn from_flat(shape: &ValueShape, data: &[T]) -> Result<Self> {
        if data.len() != shape.dof() {
            return Err(ShapeError::LengthMismatch {
                expected: shape.dof(),
                actual: data.len(),
            });
        }
        match shape {
            ValueShape::Scalar(s) if s.is_complex() => {
                Ok(Value::Complex(Complex::new(data[0], data[1])))
            }
            ValueShape::Scalar(_) => Ok(Value::Scalar(data[0])),
            ValueShape::Array(a) if a.eltype().is_complex() => {
                let elements: Vec<Complex<T>> = data
                    .chunks_exact(2)
                    .map(|c| Complex::new(c[0], c[1]))
                    .collect();
                Ok(Value::ComplexArray(ArrayD::from_shape_vec(
                    IxDyn(a.dims()).f(),
                    elements,
                )?))
            }
            ValueShape::Array(a) => Ok(Value::Array(ArrayD::from_shape_vec(
                IxDyn(a.dims()).f(),
                data.to_vec(),
            )?)),
            ValueShape::Const(c) => Ok(Value::Const(c.value().clone())),
            ValueShape::NamedTuple(nt) => {
                let mut entries = Vec::with_capacity(nt.len());
                for field in nt.fields() {
                    let value = match field.offset() {
                        Some(o) => Value::from_flat(field.shape(), &data[o..o + field.dof()])?,
                        None => Value::from_flat(field.shape(), &[])?,
                    };
                    entries.push((field.name().to_string(), value));
                }
                Ok(Value::Record(entries))
            }
        }
    }

    /// Append the flat representation of this value to `out`
    ///
    /// Constants contribute nothing.
    pub fn flatten_into(&self, out: &mut Vec<T>) {
        match self {
            Value::Scalar(v) => out.push(*v),
            Value::Complex(c) => {
                out.push(c.re);
                out.push(c.im);
            }
            Value::Array(a) => out.extend(a.t().iter().copied()),
            Value::ComplexArray(a) => {
                for c in a.t().iter() {
                    out.push(c.re);
                    out.push(c.im);
                }
            }
            Value::Const(_) => {}
            Value::Record(entries) => {
                for (_, v) in entries {
                    v.flatten_into(out);
                }
            }
        }
    }

    /// Flat representation of this value
    pub fn to_flat(&self) -> Vec<T> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    pub fn as_scalar(&self) -> Option<T> {
        match self {
            Value::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<Complex<T>> {
        match self {
            Value::Complex(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayD<T>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_complex_array(&self) -> Option<&ArrayD<Complex<T>>> {
        match self {
            Value::ComplexArray(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_const(&self) -> Option<&ConstValue> {
        match self {
            Value::Const(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&[(String, Value<T>)]> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Get a nested value by dot-separated path (e.g., "model.weights")
    pub fn get(&self, path: &str) -> Option<&Value<T>> {
        let mut current = self;
        for key in path.split('.') {
            match current {
                Value::Record(entries) => {
                    current = entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)?;
                }
                _ => return None,
            }
        }
        Some(current)
    }
}

impl<T> From<ConstValue> for Value<T> {
    fn from(c: ConstValue) -> Self {
        Value::Const(c)
    }
}
