//! Allocation of flat storage for shapes
//!
//! These are the only places where the crate allocates buffers. New buffers
//! are zero-filled (`T::default()`); Rust never hands out uninitialized
//! memory.

use crate::error::{Result, ShapeError};
use crate::shape::{NamedTupleShape, TypeDefaults, ValueShape};
use crate::table::TableView;
use crate::types::{ElType, FlatElem, Value};
use crate::view::{ShapedView, as_cells};
use std::cell::Cell;

/// Flat buffer for a single value of `shape`
pub fn allocate_flat<T: FlatElem>(shape: &ValueShape) -> Vec<T> {
    vec![T::default(); shape.dof()]
}

/// Contiguous storage for `count` values of `shape`
pub fn allocate_batch<T: FlatElem>(shape: &ValueShape, count: usize) -> FlatBatch<T> {
    FlatBatch::with_len(shape.dof(), count)
}

/// An owned flat buffer together with the shape it holds
#[derive(Debug, Clone, PartialEq)]
pub struct Shaped<T> {
    shape: ValueShape,
    data: Vec<T>,
}

impl<T: FlatElem> Shaped<T> {
    /// Allocate a zero-filled buffer for `shape`
    pub fn new(shape: ValueShape) -> Self {
        let data = allocate_flat(&shape);
        log::debug!("allocated {} entries of {} for {}", data.len(), T::ELTYPE, shape);
        Self { shape, data }
    }

    /// Wrap existing flat data; its length must equal `shape.dof()`
    pub fn from_flat(shape: ValueShape, data: Vec<T>) -> Result<Self> {
        if data.len() != shape.dof() {
            return Err(ShapeError::LengthMismatch {
                expected: shape.dof(),
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> &ValueShape {
        &self.shape
    }

    pub fn as_flat(&self) -> &[T] {
        &self.data
    }

    pub fn as_flat_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_flat(self) -> Vec<T> {
        self.data
    }

    /// Structured view of the buffer
    pub fn view(&mut self) -> ShapedView<'_, T> {
        let Shaped { shape, data } = self;
        shape.build_view(as_cells(data))
    }

    /// Copy of the stored value
    pub fn to_value(&self) -> Result<Value<T>> {
        Value::from_flat(&self.shape, &self.data)
    }
}

/// Result of [`ValueShape::make_uninitialized`], typed by the resolved element type
#[derive(Debug, Clone, PartialEq)]
pub enum Allocated {
    F64(Shaped<f64>),
    F32(Shaped<f32>),
    I64(Shaped<i64>),
    I32(Shaped<i32>),
}

impl Allocated {
    /// Element type of the flat buffer
    pub fn eltype(&self) -> ElType {
        match self {
            Allocated::F64(_) => ElType::F64,
            Allocated::F32(_) => ElType::F32,
            Allocated::I64(_) => ElType::I64,
            Allocated::I32(_) => ElType::I32,
        }
    }

    pub fn shape(&self) -> &ValueShape {
        match self {
            Allocated::F64(s) => s.shape(),
            Allocated::F32(s) => s.shape(),
            Allocated::I64(s) => s.shape(),
            Allocated::I32(s) => s.shape(),
        }
    }

    pub fn as_f64(&mut self) -> Option<&mut Shaped<f64>> {
        match self {
            Allocated::F64(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f32(&mut self) -> Option<&mut Shaped<f32>> {
        match self {
            Allocated::F32(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&mut self) -> Option<&mut Shaped<i64>> {
        match self {
            Allocated::I64(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&mut self) -> Option<&mut Shaped<i32>> {
        match self {
            Allocated::I32(s) => Some(s),
            _ => None,
        }
    }
}

impl ValueShape {
    /// Allocate storage for a value of this shape
    ///
    /// Abstract element types are resolved through `defaults`. The stored
    /// shape has its element types replaced by the concrete ones chosen.
    pub fn make_uninitialized(&self, defaults: &TypeDefaults) -> Result<Allocated> {
        fn shaped<T: FlatElem>(shape: &ValueShape) -> Shaped<T> {
            Shaped::new(shape.concretized(T::ELTYPE, T::COMPLEX_ELTYPE))
        }

        match self.default_flat_eltype(defaults)? {
            ElType::F64 => Ok(Allocated::F64(shaped(self))),
            ElType::F32 => Ok(Allocated::F32(shaped(self))),
            ElType::I64 => Ok(Allocated::I64(shaped(self))),
            ElType::I32 => Ok(Allocated::I32(shaped(self))),
            other => Err(ShapeError::NoDefaultType(other)),
        }
    }
}

/// Equal-length flat records stored in one contiguous buffer
///
/// Record `i` occupies `[i * record_len, (i + 1) * record_len)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatBatch<T> {
    data: Vec<T>,
    record_len: usize,
    len: usize,
}

impl<T: FlatElem> FlatBatch<T> {
    /// Empty batch of records with `record_len` entries each
    pub fn new(record_len: usize) -> Self {
        Self {
            data: Vec::new(),
            record_len,
            len: 0,
        }
    }

    /// Batch of `len` zero-filled records
    pub fn with_len(record_len: usize, len: usize) -> Self {
        let mut batch = Self::new(record_len);
        batch.resize(len);
        batch
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn record_len(&self) -> usize {
        self.record_len
    }

    /// Grow (zero-filled) or shrink to `len` records
    pub fn resize(&mut self, len: usize) {
        log::debug!(
            "resizing flat batch from {} to {} records of {} entries",
            self.len,
            len,
            self.record_len
        );
        self.data.resize(len * self.record_len, T::default());
        self.len = len;
    }

    /// Append one record; its length must equal `record_len`
    pub fn push(&mut self, record: &[T]) -> Result<()> {
        if record.len() != self.record_len {
            return Err(ShapeError::LengthMismatch {
                expected: self.record_len,
                actual: record.len(),
            });
        }
        self.data.extend_from_slice(record);
        self.len += 1;
        Ok(())
    }

    pub fn record(&self, index: usize) -> Option<&[T]> {
        (index < self.len)
            .then(|| &self.data[index * self.record_len..(index + 1) * self.record_len])
    }

    pub fn record_mut(&mut self, index: usize) -> Option<&mut [T]> {
        if index >= self.len {
            return None;
        }
        let start = index * self.record_len;
        Some(&mut self.data[start..start + self.record_len])
    }

    /// All records back to back
    pub fn as_flat(&self) -> &[T] {
        &self.data
    }

    pub fn as_flat_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Records as shared cell slices, ready for a [`TableView`]
    pub fn rows(&mut self) -> Vec<&[Cell<T>]> {
        let cells = as_cells(&mut self.data);
        if self.record_len == 0 {
            return vec![cells; self.len];
        }
        cells.chunks_exact(self.record_len).collect()
    }

    /// Table view of all records under `shape`
    pub fn table<'a>(&'a mut self, shape: &'a NamedTupleShape) -> Result<TableView<'a, T>> {
        TableView::new(shape, self.rows())
    }
}
