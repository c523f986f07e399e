//! Resolution of abstract element types to concrete defaults

use super::ValueShape;
use crate::error::{Result, ShapeError};
use crate::types::ElType;

/// Table mapping abstract element types to the concrete type used for storage
///
/// The default table maps `Real` and `AbstractFloat` to `f64`, `Integer` to
/// `i64` and `Complex` to `Complex<f64>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefaults {
    entries: Vec<(ElType, ElType)>,
}

impl Default for TypeDefaults {
    fn default() -> Self {
        Self {
            entries: vec![
                (ElType::Real, ElType::F64),
                (ElType::AbstractFloat, ElType::F64),
                (ElType::Integer, ElType::I64),
                (ElType::Complex, ElType::C64),
            ],
        }
    }
}

impl TypeDefaults {
    /// Table without any entries; only concrete types resolve
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register (or replace) the default for an abstract type
    pub fn with_default(mut self, abstract_type: ElType, concrete: ElType) -> Result<Self> {
        if !concrete.is_concrete() || !concrete.is_subtype_of(abstract_type) {
            return Err(ShapeError::UnsupportedElementType {
                eltype: concrete,
                context: "default type resolution",
            });
        }
        self.entries.retain(|(a, _)| *a != abstract_type);
        self.entries.push((abstract_type, concrete));
        Ok(self)
    }

    /// Concrete type for `eltype`; concrete types resolve to themselves
    pub fn resolve(&self, eltype: ElType) -> Result<ElType> {
        if eltype.is_concrete() {
            return Ok(eltype);
        }
        self.entries
            .iter()
            .find(|(a, _)| *a == eltype)
            .map(|(_, c)| *c)
            .ok_or(ShapeError::NoDefaultType(eltype))
    }
}

impl ValueShape {
    /// Concrete real type to use for flat storage of this shape
    pub fn default_flat_eltype(&self, defaults: &TypeDefaults) -> Result<ElType> {
        match self {
            ValueShape::Scalar(s) => Ok(defaults.resolve(s.eltype())?.real_part()),
            ValueShape::Array(a) => Ok(defaults.resolve(a.eltype())?.real_part()),
            ValueShape::Const(_) => defaults.resolve(ElType::Real),
            ValueShape::NamedTuple(nt) => {
                let mut flat: Option<ElType> = None;
                for field in nt.fields().iter().filter(|f| !f.shape().is_const()) {
                    let t = field.shape().default_flat_eltype(defaults)?;
                    flat = Some(flat.map_or(t, |acc| acc.promote(t)));
                }
                match flat {
                    Some(t) => Ok(t),
                    None => defaults.resolve(ElType::Real),
                }
            }
        }
    }
}
