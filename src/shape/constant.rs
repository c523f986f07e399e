//! Shapes of constant values

use crate::types::{ConstValue, ElType};

/// Shape of a value pinned to a constant
///
/// Constant shapes have zero degrees of freedom and never occupy buffer space.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstValueShape {
    value: ConstValue,
}

impl ConstValueShape {
    pub fn new(value: impl Into<ConstValue>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &ConstValue {
        &self.value
    }

    pub fn eltype(&self) -> ElType {
        self.value.eltype()
    }

    pub fn dims(&self) -> &[usize] {
        self.value.dims()
    }

    /// Constant zero shape of the same kind and extents
    pub fn zero_shape(&self) -> ConstValueShape {
        ConstValueShape {
            value: self.value.zero(),
        }
    }
}
