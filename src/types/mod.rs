//! Core value types for flatshape

mod constant;
mod element;
mod eltype;
mod value;

pub use constant::ConstValue;
pub use element::FlatElem;
pub use eltype::ElType;
pub use value::Value;
