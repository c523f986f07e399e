//! flatshape - Value shapes and zero-copy views over flat real-valued buffers
//!
//! Numerical code (optimizers, samplers, automatic differentiation) works on
//! flat vectors of reals, while models are written against named, structured
//! parameters. A [`ValueShape`] describes the structure; it knows how many flat
//! entries a value needs and can view a flat buffer as that value without
//! copying.
//!
//! # Features
//!
//! - Scalar, complex, array, constant and named tuple shapes
//! - Layout planned once per named tuple shape, constants take no space
//! - Zero-copy views that write straight through to the buffer
//! - Batched (table) views with column access and materialization
//! - A compatibility partial order on shapes
//!
//! # Example
//!
//! ```rust
//! use flatshape::{ElType, ValueShape};
//!
//! let shape = ValueShape::named([
//!     ("a", ValueShape::scalar(ElType::Real)),
//!     ("b", ValueShape::array(ElType::Real, [2, 3]).unwrap()),
//!     ("c", ValueShape::constant(4.0)),
//! ])
//! .unwrap();
//! assert_eq!(shape.dof(), 7);
//!
//! let mut data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
//! {
//!     let view = shape.apply_mut(&mut data).unwrap();
//!     let record = view.as_record().unwrap();
//!     assert_eq!(record.get_scalar("a"), Some(1.0));
//!
//!     let b = record.field("b").unwrap().as_array().unwrap();
//!     assert_eq!(b.get(&[1, 0]), Some(3.0));
//!     b.set(&[0, 2], 60.0);
//! }
//! assert_eq!(data[5], 60.0);
//! ```

pub mod accessor;
pub mod alloc;
pub mod error;
pub mod function;
pub mod shape;
pub mod table;
pub mod types;
pub mod view;

// Re-export common types at crate root
pub use accessor::ValueAccessor;
pub use alloc::{Allocated, FlatBatch, Shaped, allocate_batch, allocate_flat};
pub use error::{ErrorKind, Result, ShapeError};
pub use function::{ShapedFn, ValShape, VarShape};
pub use shape::{
    ArrayShape, ConstValueShape, Field, NamedTupleShape, ScalarShape, TypeDefaults, ValueShape,
};
pub use table::{Column, ColumnData, Columnar, Columns, TableView};
pub use types::{ConstValue, ElType, FlatElem, Value};
pub use view::{
    ArrayView, ComplexArrayView, ComplexView, RecordView, ScalarView, ShapedView, Stripped,
    as_cells, strip_scalar,
};
