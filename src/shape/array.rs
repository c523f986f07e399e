//! Array shapes

use crate::error::{Result, ShapeError};
use crate::types::ElType;

/// Shape of an N-dimensional array with fixed extents
///
/// Flat data is laid out in column-major order: the first index varies
/// fastest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayShape {
    eltype: ElType,
    dims: Vec<usize>,
    dof: usize,
}

impl ArrayShape {
    /// Create an array shape
    ///
    /// Complex elements take two flat entries each. Zero extents are allowed;
    /// a degree-of-freedom count that overflows `usize` is rejected.
    pub fn new(eltype: ElType, dims: impl Into<Vec<usize>>) -> Result<Self> {
        let dims = dims.into();
        let dof = dims
            .iter()
            .try_fold(eltype.dof(), |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| ShapeError::ExtentOverflow { dims: dims.clone() })?;
        Ok(Self { eltype, dims, dof })
    }

    pub fn eltype(&self) -> ElType {
        self.eltype
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements
    pub fn num_elements(&self) -> usize {
        self.dims.iter().product()
    }

    pub fn dof(&self) -> usize {
        self.dof
    }

    pub(crate) fn with_eltype(&self, eltype: ElType) -> Self {
        Self {
            eltype,
            dims: self.dims.clone(),
            dof: self.dof,
        }
    }
}
