//! Shapes of values
//!
//! A shape combines an element type with size information. Shapes are
//! immutable once built; named tuple shapes plan their flat layout at
//! construction time and reuse it for every buffer they are applied to.

mod array;
mod constant;
mod defaults;
mod named;
mod order;
mod scalar;

pub use array::ArrayShape;
pub use constant::ConstValueShape;
pub use defaults::TypeDefaults;
pub use named::{Field, NamedTupleShape};
pub use scalar::ScalarShape;

use crate::error::Result;
use crate::types::{ConstValue, ElType};
use std::fmt;

/// Shape of a value: scalar, array, constant or named tuple
#[derive(Debug, Clone, PartialEq)]
pub enum ValueShape {
    Scalar(ScalarShape),
    Array(ArrayShape),
    Const(ConstValueShape),
    NamedTuple(NamedTupleShape),
}

impl ValueShape {
    /// Scalar shape of the given element type
    pub fn scalar(eltype: ElType) -> Self {
        ValueShape::Scalar(ScalarShape::new(eltype))
    }

    /// Array shape with the given element type and extents
    pub fn array(eltype: ElType, dims: impl Into<Vec<usize>>) -> Result<Self> {
        ArrayShape::new(eltype, dims).map(ValueShape::Array)
    }

    /// Shape pinned to a constant value
    pub fn constant(value: impl Into<ConstValue>) -> Self {
        ValueShape::Const(ConstValueShape::new(value))
    }

    /// Named tuple shape from ordered (name, shape) pairs
    pub fn named<S: Into<String>>(fields: impl IntoIterator<Item = (S, ValueShape)>) -> Result<Self> {
        NamedTupleShape::new(fields).map(ValueShape::NamedTuple)
    }

    /// Number of reals needed to store a value of this shape, constants excluded
    pub fn dof(&self) -> usize {
        match self {
            ValueShape::Scalar(s) => s.dof(),
            ValueShape::Array(a) => a.dof(),
            ValueShape::Const(_) => 0,
            ValueShape::NamedTuple(nt) => nt.dof(),
        }
    }

    /// Element type, possibly abstract
    pub fn eltype(&self) -> ElType {
        match self {
            ValueShape::Scalar(s) => s.eltype(),
            ValueShape::Array(a) => a.eltype(),
            ValueShape::Const(c) => c.eltype(),
            ValueShape::NamedTuple(nt) => nt.eltype(),
        }
    }

    pub fn is_const(&self) -> bool {
        matches!(self, ValueShape::Const(_))
    }

    pub fn as_scalar(&self) -> Option<&ScalarShape> {
        match self {
            ValueShape::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayShape> {
        match self {
            ValueShape::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_const(&self) -> Option<&ConstValueShape> {
        match self {
            ValueShape::Const(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_named_tuple(&self) -> Option<&NamedTupleShape> {
        match self {
            ValueShape::NamedTuple(nt) => Some(nt),
            _ => None,
        }
    }

    /// Shape of a single element of an array shape
    pub fn elshape(&self) -> Option<ScalarShape> {
        self.as_array().map(|a| ScalarShape::new(a.eltype()))
    }

    /// Recursively replace every constant shape with `f(constant)`
    ///
    /// Named tuple layouts are re-planned, so replacing a constant with a
    /// non-constant shape gives the field buffer space.
    pub fn replace_const_shapes<F>(&self, f: F) -> Result<ValueShape>
    where
        F: Fn(&ConstValueShape) -> ValueShape,
    {
        self.replace_consts_with(&f)
    }

    fn replace_consts_with<F>(&self, f: &F) -> Result<ValueShape>
    where
        F: Fn(&ConstValueShape) -> ValueShape,
    {
        match self {
            ValueShape::Const(c) => Ok(f(c)),
            ValueShape::NamedTuple(nt) => {
                let fields = nt
                    .fields()
                    .iter()
                    .map(|field| Ok((field.name().to_string(), field.shape().replace_consts_with(f)?)))
                    .collect::<Result<Vec<_>>>()?;
                ValueShape::named(fields)
            }
            other => Ok(other.clone()),
        }
    }

    /// Shape of the gradient of a function taking values of this shape
    ///
    /// Constants are replaced by constant zeros of the same kind.
    pub fn gradient_shape(&self) -> Result<ValueShape> {
        self.replace_const_shapes(|c| ValueShape::Const(c.zero_shape()))
    }

    /// Same layout with every leaf element type passed through `f`
    ///
    /// `f` must map complex types to complex types so the layout is unchanged.
    pub(crate) fn map_eltypes(&self, f: &dyn Fn(ElType) -> ElType) -> ValueShape {
        match self {
            ValueShape::Scalar(s) => ValueShape::scalar(f(s.eltype())),
            ValueShape::Array(a) => ValueShape::Array(a.with_eltype(f(a.eltype()))),
            ValueShape::Const(c) => ValueShape::Const(c.clone()),
            ValueShape::NamedTuple(nt) => ValueShape::NamedTuple(nt.map_eltypes(f)),
        }
    }

    /// Storage layout of this shape in a buffer of `real` entries
    ///
    /// Every leaf takes the buffer's type (`complex` for complex leaves),
    /// whatever it was declared as.
    pub(crate) fn concretized(&self, real: ElType, complex: ElType) -> ValueShape {
        self.map_eltypes(&|t| if t.is_complex() { complex } else { real })
    }

    /// Shape of a value of this shape held in a buffer of `real` entries
    ///
    /// Concrete leaves keep their declared type. Abstract leaves narrow to the
    /// buffer's type when it is one of their specializations. The result is
    /// always `<=` `self`.
    pub(crate) fn refined(&self, real: ElType, complex: ElType) -> ValueShape {
        self.map_eltypes(&|t| {
            let candidate = if t.is_complex() { complex } else { real };
            if t.is_abstract() && candidate.is_subtype_of(t) {
                candidate
            } else {
                t
            }
        })
    }
}

impl From<ScalarShape> for ValueShape {
    fn from(s: ScalarShape) -> Self {
        ValueShape::Scalar(s)
    }
}

impl From<ArrayShape> for ValueShape {
    fn from(a: ArrayShape) -> Self {
        ValueShape::Array(a)
    }
}

impl From<ConstValueShape> for ValueShape {
    fn from(c: ConstValueShape) -> Self {
        ValueShape::Const(c)
    }
}

impl From<NamedTupleShape> for ValueShape {
    fn from(nt: NamedTupleShape) -> Self {
        ValueShape::NamedTuple(nt)
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueShape::Scalar(s) => write!(f, "Scalar<{}>", s.eltype()),
            ValueShape::Array(a) => {
                write!(f, "Array<{}>(", a.eltype())?;
                for (i, d) in a.dims().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", d)?;
                }
                f.write_str(")")
            }
            ValueShape::Const(c) => write!(f, "Const({})", c.value()),
            ValueShape::NamedTuple(nt) => {
                f.write_str("{")?;
                for (i, field) in nt.fields().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", field.name(), field.shape())?;
                }
                f.write_str("}")
            }
        }
    }
}
