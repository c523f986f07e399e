//! Element types of shaped values

use std::cmp::Ordering;
use std::fmt;

/// Numeric element type of a shape
///
/// Abstract variants (`Real`, `AbstractFloat`, `Integer`, `Complex`) stand for
/// a family of concrete types and are resolved through
/// [`TypeDefaults`](crate::TypeDefaults) whenever storage has to be allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElType {
    Real,
    AbstractFloat,
    Integer,
    Complex,
    F64,
    F32,
    I64,
    I32,
    C64,
    C32,
}

impl ElType {
    /// Direct supertype in the lattice, `None` for the roots
    pub fn parent(self) -> Option<ElType> {
        match self {
            ElType::Real | ElType::Complex => None,
            ElType::AbstractFloat | ElType::Integer => Some(ElType::Real),
            ElType::F64 | ElType::F32 => Some(ElType::AbstractFloat),
            ElType::I64 | ElType::I32 => Some(ElType::Integer),
            ElType::C64 | ElType::C32 => Some(ElType::Complex),
        }
    }

    pub fn is_abstract(self) -> bool {
        matches!(
            self,
            ElType::Real | ElType::AbstractFloat | ElType::Integer | ElType::Complex
        )
    }

    pub fn is_concrete(self) -> bool {
        !self.is_abstract()
    }

    /// True for `Complex` and its concrete members
    pub fn is_complex(self) -> bool {
        matches!(self, ElType::Complex | ElType::C64 | ElType::C32)
    }

    /// Number of reals needed to store one element
    pub fn dof(self) -> usize {
        if self.is_complex() { 2 } else { 1 }
    }

    /// `self` is the same as, or a specialization of, `other`
    pub fn is_subtype_of(self, other: ElType) -> bool {
        let mut current = Some(self);
        while let Some(t) = current {
            if t == other {
                return true;
            }
            current = t.parent();
        }
        false
    }

    /// Type of one real component (`Complex<f64>` -> `f64`, `Complex` -> `Real`)
    pub fn real_part(self) -> ElType {
        match self {
            ElType::C64 => ElType::F64,
            ElType::C32 => ElType::F32,
            ElType::Complex => ElType::Real,
            other => other,
        }
    }

    /// Common type able to hold values of both `self` and `other`
    pub fn promote(self, other: ElType) -> ElType {
        if self == other {
            return self;
        }
        if self.is_complex() || other.is_complex() {
            return match self.real_part().promote(other.real_part()) {
                ElType::F32 => ElType::C32,
                t if t.is_concrete() => ElType::C64,
                _ => ElType::Complex,
            };
        }
        if self.is_abstract() || other.is_abstract() {
            let mut current = Some(self);
            while let Some(t) = current {
                if other.is_subtype_of(t) {
                    return t;
                }
                current = t.parent();
            }
            return ElType::Real;
        }
        match (self, other) {
            (ElType::F64, _) | (_, ElType::F64) => ElType::F64,
            (ElType::F32, _) | (_, ElType::F32) => ElType::F32,
            _ => ElType::I64,
        }
    }
}

impl PartialOrd for ElType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.is_subtype_of(*other), other.is_subtype_of(*self)) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => None,
        }
    }
}

impl fmt::Display for ElType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElType::Real => "Real",
            ElType::AbstractFloat => "AbstractFloat",
            ElType::Integer => "Integer",
            ElType::Complex => "Complex",
            ElType::F64 => "f64",
            ElType::F32 => "f32",
            ElType::I64 => "i64",
            ElType::I32 => "i32",
            ElType::C64 => "Complex<f64>",
            ElType::C32 => "Complex<f32>",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_order() {
        assert!(ElType::F64 <= ElType::Real);
        assert!(ElType::F64 <= ElType::AbstractFloat);
        assert!(ElType::I32 < ElType::Integer);
        assert!(ElType::Real > ElType::Integer);
        assert_eq!(ElType::F64.partial_cmp(&ElType::Integer), None);
        assert_eq!(ElType::C64.partial_cmp(&ElType::Real), None);
        assert!(!(ElType::F64 <= ElType::Integer));
    }

    #[test]
    fn dof_per_element() {
        assert_eq!(ElType::Real.dof(), 1);
        assert_eq!(ElType::I32.dof(), 1);
        assert_eq!(ElType::Complex.dof(), 2);
        assert_eq!(ElType::C32.dof(), 2);
    }

    #[test]
    fn promotion() {
        assert_eq!(ElType::F64.promote(ElType::I64), ElType::F64);
        assert_eq!(ElType::I32.promote(ElType::I64), ElType::I64);
        assert_eq!(ElType::F32.promote(ElType::I32), ElType::F32);
        assert_eq!(ElType::F64.promote(ElType::Integer), ElType::Real);
        assert_eq!(ElType::AbstractFloat.promote(ElType::F32), ElType::AbstractFloat);
        assert_eq!(ElType::F32.promote(ElType::C32), ElType::C32);
    }
}
