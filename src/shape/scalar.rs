//! Scalar shapes

use crate::types::ElType;

/// Shape of a single scalar value
///
/// Complex scalars take two degrees of freedom, stored real part first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarShape {
    eltype: ElType,
}

impl ScalarShape {
    pub fn new(eltype: ElType) -> Self {
        Self { eltype }
    }

    pub fn eltype(&self) -> ElType {
        self.eltype
    }

    pub fn dof(&self) -> usize {
        self.eltype.dof()
    }

    pub fn is_complex(&self) -> bool {
        self.eltype.is_complex()
    }
}
