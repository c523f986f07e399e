//! Rust types that can back a flat buffer

use super::ElType;
use std::fmt::Debug;

/// Trait for types that can be stored in a flat buffer
pub trait FlatElem: Copy + Default + PartialEq + Debug + 'static {
    /// Concrete element type of one buffer entry
    const ELTYPE: ElType;
    /// Element type of a complex scalar packed from two buffer entries
    const COMPLEX_ELTYPE: ElType;
}

impl FlatElem for f64 {
    const ELTYPE: ElType = ElType::F64;
    const COMPLEX_ELTYPE: ElType = ElType::C64;
}
impl FlatElem for f32 {
    const ELTYPE: ElType = ElType::F32;
    const COMPLEX_ELTYPE: ElType = ElType::C32;
}
impl FlatElem for i64 {
    const ELTYPE: ElType = ElType::I64;
    const COMPLEX_ELTYPE: ElType = ElType::Complex;
}
impl FlatElem for i32 {
    const ELTYPE: ElType = ElType::I32;
    const COMPLEX_ELTYPE: ElType = ElType::Complex;
}
