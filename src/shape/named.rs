//! Named tuple shapes and their flat layout

use super::ValueShape;
use crate::accessor::ValueAccessor;
use crate::error::{Result, ShapeError};
use crate::types::ElType;
use std::collections::HashSet;

/// One field of a named tuple shape
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    shape: ValueShape,
    offset: Option<usize>,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &ValueShape {
        &self.shape
    }

    /// Start of the field's range in a flat buffer, `None` for constants
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn dof(&self) -> usize {
        self.shape.dof()
    }

    /// Accessor for the field's flat range, `None` for constants
    pub fn accessor(&self) -> Option<ValueAccessor<'_>> {
        self.offset
            .map(|offset| ValueAccessor::new(&self.shape, offset))
    }
}

/// Shape of an ordered set of named values
///
/// Fields are laid out back to back in declaration order. Constant fields
/// take no buffer space.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTupleShape {
    fields: Vec<Field>,
    dof: usize,
}

impl NamedTupleShape {
    /// Create a named tuple shape and plan its layout
    ///
    /// Fails if a field name occurs twice or the total degrees of freedom
    /// overflow.
    pub fn new<S: Into<String>>(fields: impl IntoIterator<Item = (S, ValueShape)>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut planned = Vec::new();
        let mut offset = 0usize;

        for (name, shape) in fields {
            let name = name.into();
            if !seen.insert(name.clone()) {
                return Err(ShapeError::DuplicateField { name });
            }
            let field_offset = if shape.is_const() {
                None
            } else {
                let start = offset;
                offset = offset
                    .checked_add(shape.dof())
                    .ok_or_else(|| ShapeError::ExtentOverflow {
                        dims: vec![start, shape.dof()],
                    })?;
                Some(start)
            };
            planned.push(Field {
                name,
                shape,
                offset: field_offset,
            });
        }

        log::trace!(
            "planned named tuple layout: {} fields, {} degrees of freedom",
            planned.len(),
            offset
        );

        Ok(Self {
            fields: planned,
            dof: offset,
        })
    }

    pub fn dof(&self) -> usize {
        self.dof
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name())
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn accessor(&self, name: &str) -> Option<ValueAccessor<'_>> {
        self.field(name).and_then(Field::accessor)
    }

    /// Promotion of the element types of all non-constant fields
    pub fn eltype(&self) -> ElType {
        self.fields
            .iter()
            .filter(|f| !f.shape.is_const())
            .map(|f| f.shape.eltype())
            .reduce(ElType::promote)
            .unwrap_or(ElType::Real)
    }

    pub(crate) fn map_eltypes(&self, f: &dyn Fn(ElType) -> ElType) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .map(|field| Field {
                    name: field.name.clone(),
                    shape: field.shape.map_eltypes(f),
                    offset: field.offset,
                })
                .collect(),
            dof: self.dof,
        }
    }
}
