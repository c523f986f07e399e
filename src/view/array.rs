//! Array views over flat buffers
//!
//! Arrays are stored in column-major order, so the flat window can be handed
//! to ndarray without copying. Complex elements take two consecutive entries,
//! real part first.

use crate::error::Result;
use crate::shape::ArrayShape;
use crate::types::FlatElem;
use ndarray::{ArrayD, ArrayViewD, IxDyn, ShapeBuilder};
use num_complex::Complex;
use std::cell::Cell;

fn column_major_index(dims: &[usize], index: &[usize]) -> Option<usize> {
    if index.len() != dims.len() {
        return None;
    }
    let mut linear = 0;
    let mut stride = 1;
    for (&i, &d) in index.iter().zip(dims) {
        if i >= d {
            return None;
        }
        linear += i * stride;
        stride *= d;
    }
    Some(linear)
}

/// View of a flat window as an N-dimensional array (zero-copy)
#[derive(Debug, Clone, Copy)]
pub struct ArrayView<'a, T: FlatElem> {
    pub(crate) shape: &'a ArrayShape,
    pub(crate) data: &'a [Cell<T>],
}

impl<'a, T: FlatElem> ArrayView<'a, T> {
    pub fn shape(&self) -> &'a ArrayShape {
        self.shape
    }

    pub fn dims(&self) -> &'a [usize] {
        self.shape.dims()
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at a multi-dimensional index
    pub fn get(&self, index: &[usize]) -> Option<T> {
        column_major_index(self.dims(), index).map(|i| self.data[i].get())
    }

    /// Write the element at `index`, returning the previous value
    ///
    /// Returns `None` (and writes nothing) if the index is out of bounds.
    pub fn set(&self, index: &[usize], value: T) -> Option<T> {
        column_major_index(self.dims(), index).map(|i| self.data[i].replace(value))
    }

    /// Set every element to `value`
    pub fn fill(&self, value: T) {
        for cell in self.data {
            cell.set(value);
        }
    }

    /// Zero-copy ndarray view of the cells
    pub fn as_ndarray(&self) -> Result<ArrayViewD<'a, Cell<T>>> {
        Ok(ArrayViewD::from_shape(IxDyn(self.dims()).f(), self.data)?)
    }

    /// Copy into an owned ndarray
    pub fn to_owned(&self) -> Result<ArrayD<T>> {
        let elements: Vec<T> = self.data.iter().map(Cell::get).collect();
        Ok(ArrayD::from_shape_vec(IxDyn(self.dims()).f(), elements)?)
    }

    pub fn cells(&self) -> &'a [Cell<T>] {
        self.data
    }
}

/// View of a flat window as an N-dimensional complex array (zero-copy)
#[derive(Debug, Clone, Copy)]
pub struct ComplexArrayView<'a, T: FlatElem> {
    pub(crate) shape: &'a ArrayShape,
    pub(crate) data: &'a [Cell<T>],
}

impl<'a, T: FlatElem> ComplexArrayView<'a, T> {
    pub fn shape(&self) -> &'a ArrayShape {
        self.shape
    }

    pub fn dims(&self) -> &'a [usize] {
        self.shape.dims()
    }

    /// Total number of complex elements
    pub fn len(&self) -> usize {
        self.data.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn entry(&self, i: usize) -> Complex<T> {
        Complex::new(self.data[2 * i].get(), self.data[2 * i + 1].get())
    }

    pub fn get(&self, index: &[usize]) -> Option<Complex<T>> {
        column_major_index(self.dims(), index).map(|i| self.entry(i))
    }

    /// Write the element at `index`, returning the previous value
    ///
    /// Returns `None` (and writes nothing) if the index is out of bounds.
    pub fn set(&self, index: &[usize], value: Complex<T>) -> Option<Complex<T>> {
        column_major_index(self.dims(), index).map(|i| {
            let re = self.data[2 * i].replace(value.re);
            let im = self.data[2 * i + 1].replace(value.im);
            Complex::new(re, im)
        })
    }

    pub fn fill(&self, value: Complex<T>) {
        for pair in self.data.chunks_exact(2) {
            pair[0].set(value.re);
            pair[1].set(value.im);
        }
    }

    /// Zero-copy ndarray view of the cells
    ///
    /// A leading axis of length 2 selects the real (0) or imaginary (1) part.
    pub fn as_ndarray(&self) -> Result<ArrayViewD<'a, Cell<T>>> {
        let mut dims = Vec::with_capacity(self.dims().len() + 1);
        dims.push(2);
        dims.extend_from_slice(self.dims());
        Ok(ArrayViewD::from_shape(IxDyn(&dims).f(), self.data)?)
    }

    /// Copy into an owned ndarray
    pub fn to_owned(&self) -> Result<ArrayD<Complex<T>>> {
        let elements: Vec<Complex<T>> = (0..self.len()).map(|i| self.entry(i)).collect();
        Ok(ArrayD::from_shape_vec(IxDyn(self.dims()).f(), elements)?)
    }

    pub fn cells(&self) -> &'a [Cell<T>] {
        self.data
    }
}
