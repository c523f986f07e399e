//! Constant values pinned by a [`ConstValueShape`](crate::ConstValueShape)

use super::ElType;
use ndarray::ArrayD;
use num_complex::Complex64;
use std::fmt;

/// A fixed value that never occupies buffer space
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Real(f64),
    Int(i64),
    Complex(Complex64),
    RealArray(ArrayD<f64>),
    IntArray(ArrayD<i64>),
}

impl ConstValue {
    /// Element type of the stored value
    pub fn eltype(&self) -> ElType {
        match self {
            ConstValue::Real(_) | ConstValue::RealArray(_) => ElType::F64,
            ConstValue::Int(_) | ConstValue::IntArray(_) => ElType::I64,
            ConstValue::Complex(_) => ElType::C64,
        }
    }

    /// Array extents, empty for scalars
    pub fn dims(&self) -> &[usize] {
        match self {
            ConstValue::Real(_) | ConstValue::Int(_) | ConstValue::Complex(_) => &[],
            ConstValue::RealArray(a) => a.shape(),
            ConstValue::IntArray(a) => a.shape(),
        }
    }

    /// Zero of the same kind and extents
    pub fn zero(&self) -> ConstValue {
        match self {
            ConstValue::Real(_) => ConstValue::Real(0.0),
            ConstValue::Int(_) => ConstValue::Int(0),
            ConstValue::Complex(_) => ConstValue::Complex(Complex64::new(0.0, 0.0)),
            ConstValue::RealArray(a) => ConstValue::RealArray(ArrayD::zeros(a.raw_dim())),
            ConstValue::IntArray(a) => ConstValue::IntArray(ArrayD::zeros(a.raw_dim())),
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            ConstValue::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConstValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_real_array(&self) -> Option<&ArrayD<f64>> {
        match self {
            ConstValue::RealArray(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&ArrayD<i64>> {
        match self {
            ConstValue::IntArray(a) => Some(a),
            _ => None,
        }
    }

    /// Bitwise identity of kind, extents and every stored number
    ///
    /// Unlike `==`, a NaN constant is the same as itself, while `0.0` and
    /// `-0.0` differ.
    pub fn same_as(&self, other: &ConstValue) -> bool {
        match (self, other) {
            (ConstValue::Real(a), ConstValue::Real(b)) => a.to_bits() == b.to_bits(),
            (ConstValue::Int(a), ConstValue::Int(b)) => a == b,
            (ConstValue::Complex(a), ConstValue::Complex(b)) => {
                a.re.to_bits() == b.re.to_bits() && a.im.to_bits() == b.im.to_bits()
            }
            (ConstValue::RealArray(a), ConstValue::RealArray(b)) => {
                a.shape() == b.shape()
                    && a.iter().zip(b.iter()).all(|(x, y)| x.to_bits() == y.to_bits())
            }
            (ConstValue::IntArray(a), ConstValue::IntArray(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Real(v) => write!(f, "{}", v),
            ConstValue::Int(v) => write!(f, "{}", v),
            ConstValue::Complex(c) => write!(f, "{}", c),
            ConstValue::RealArray(a) => write!(f, "{}{:?}", ElType::F64, a.shape()),
            ConstValue::IntArray(a) => write!(f, "{}{:?}", ElType::I64, a.shape()),
        }
    }
}

impl From<f64> for ConstValue {
    fn from(v: f64) -> Self {
        ConstValue::Real(v)
    }
}

impl From<i64> for ConstValue {
    fn from(v: i64) -> Self {
        ConstValue::Int(v)
    }
}

impl From<Complex64> for ConstValue {
    fn from(v: Complex64) -> Self {
        ConstValue::Complex(v)
    }
}

impl From<ArrayD<f64>> for ConstValue {
    fn from(v: ArrayD<f64>) -> Self {
        ConstValue::RealArray(v)
    }
}

impl From<ArrayD<i64>> for ConstValue {
    fn from(v: ArrayD<i64>) -> Self {
        ConstValue::IntArray(v)
    }
}
