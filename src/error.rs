//! Error types for flatshape

use crate::shape::ValueShape;
use crate::types::ElType;
use thiserror::Error;

/// Coarse classification of a [`ShapeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Structurally invalid shape declaration, raised at construction time
    Definition,
    /// Buffer length or shape does not fit the expected shape
    Mismatch,
    /// Abstract element type without a registered default
    TypeResolution,
}

/// Errors raised by shape construction, view construction and allocation
#[derive(Debug, Error)]
pub enum ShapeError {
    /// Two fields of a named tuple shape share a name
    #[error("duplicate field name '{name}' in named tuple shape")]
    DuplicateField { name: String },

    /// Product of extents (or sum of field dofs) does not fit in usize
    #[error("degrees of freedom overflow for extents {dims:?}")]
    ExtentOverflow { dims: Vec<usize> },

    /// Element type cannot be used for this kind of shape
    #[error("element type {eltype} not supported for {context}")]
    UnsupportedElementType {
        eltype: ElType,
        context: &'static str,
    },

    /// Buffer length differs from the shape's degrees of freedom
    #[error("shape mismatch: expected buffer of length {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A row of a batched view is shorter than the shape's degrees of freedom
    #[error("shape mismatch: row {row} has length {actual}, need at least {required}")]
    RowTooShort {
        row: usize,
        required: usize,
        actual: usize,
    },

    /// Row index past the end of a batched view
    #[error("shape mismatch: row {row} out of bounds for {len} rows")]
    RowOutOfBounds { row: usize, len: usize },

    /// Actual shape does not compare `<=` the expected shape
    #[error("shape mismatch: {actual} is not compatible with {expected}")]
    Incompatible {
        actual: ValueShape,
        expected: ValueShape,
    },

    /// ndarray rejected a layout
    #[error("shape mismatch: {0}")]
    Layout(#[from] ndarray::ShapeError),

    /// No default concrete type for an abstract element type
    #[error("no default concrete type registered for {0}")]
    NoDefaultType(ElType),
}

impl ShapeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShapeError::DuplicateField { .. }
            | ShapeError::ExtentOverflow { .. }
            | ShapeError::UnsupportedElementType { .. } => ErrorKind::Definition,
            ShapeError::LengthMismatch { .. }
            | ShapeError::RowTooShort { .. }
            | ShapeError::RowOutOfBounds { .. }
            | ShapeError::Incompatible { .. }
            | ShapeError::Layout(_) => ErrorKind::Mismatch,
            ShapeError::NoDefaultType(_) => ErrorKind::TypeResolution,
        }
    }

    pub(crate) fn incompatible(actual: &ValueShape, expected: &ValueShape) -> Self {
        ShapeError::Incompatible {
            actual: actual.clone(),
            expected: expected.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        let err = ShapeError::DuplicateField { name: "a".into() };
        assert_eq!(err.kind(), ErrorKind::Definition);
        assert!(err.to_string().contains("'a'"));

        let err = ShapeError::LengthMismatch {
            expected: 7,
            actual: 6,
        };
        assert_eq!(err.kind(), ErrorKind::Mismatch);
        assert!(err.to_string().contains("length 7"));

        let err = ShapeError::NoDefaultType(ElType::Integer);
        assert_eq!(err.kind(), ErrorKind::TypeResolution);
        assert_eq!(
            err.to_string(),
            "no default concrete type registered for Integer"
        );
    }
}
