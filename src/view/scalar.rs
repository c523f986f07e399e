//! Scalar views

use crate::shape::ScalarShape;
use crate::types::FlatElem;
use num_complex::Complex;
use std::cell::Cell;

/// Alias of a single buffer entry
#[derive(Debug, Clone, Copy)]
pub struct ScalarView<'a, T: FlatElem> {
    pub(crate) shape: &'a ScalarShape,
    pub(crate) cell: &'a Cell<T>,
}

impl<'a, T: FlatElem> ScalarView<'a, T> {
    pub fn shape(&self) -> &'a ScalarShape {
        self.shape
    }

    pub fn get(&self) -> T {
        self.cell.get()
    }

    /// Write `value`, returning the previous one
    pub fn set(&self, value: T) -> T {
        self.cell.replace(value)
    }

    pub fn cell(&self) -> &'a Cell<T> {
        self.cell
    }
}

/// Complex scalar packed as two consecutive entries: real, then imaginary
#[derive(Debug, Clone, Copy)]
pub struct ComplexView<'a, T: FlatElem> {
    pub(crate) shape: &'a ScalarShape,
    pub(crate) cells: &'a [Cell<T>],
}

impl<'a, T: FlatElem> ComplexView<'a, T> {
    pub fn shape(&self) -> &'a ScalarShape {
        self.shape
    }

    pub fn get(&self) -> Complex<T> {
        Complex::new(self.cells[0].get(), self.cells[1].get())
    }

    /// Write `value`, returning the previous one
    pub fn set(&self, value: Complex<T>) -> Complex<T> {
        let re = self.cells[0].replace(value.re);
        let im = self.cells[1].replace(value.im);
        Complex::new(re, im)
    }
}
