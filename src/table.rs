//! Batched views: many records of one named tuple shape
//!
//! A [`TableView`] holds one cell slice per row. Rows may live in one
//! contiguous [`FlatBatch`](crate::alloc::FlatBatch) or anywhere else; they only
//! have to be at least as long as the shape's degrees of freedom. Rows are
//! exposed as [`RecordView`]s and columns as [`Column`]s, both writing straight
//! through to the rows.

use crate::error::{Result, ShapeError};
use crate::shape::{Field, NamedTupleShape, ValueShape};
use crate::types::{ConstValue, FlatElem, Value};
use crate::view::{RecordView, ShapedView};
use ndarray::{Array1, ArrayD, IxDyn, ShapeBuilder};
use num_complex::Complex;
use std::cell::Cell;

fn field_window<'r, T>(field: &Field, row: &'r [Cell<T>]) -> &'r [Cell<T>] {
    match field.offset() {
        Some(o) => &row[o..o + field.dof()],
        None => &row[..0],
    }
}

/// Table view of equally shaped records
#[derive(Debug, Clone)]
pub struct TableView<'a, T: FlatElem> {
    shape: &'a NamedTupleShape,
    rows: Vec<&'a [Cell<T>]>,
}

impl<'a, T: FlatElem> TableView<'a, T> {
    /// Create a table view; every row must hold at least `shape.dof()` entries
    pub fn new(shape: &'a NamedTupleShape, rows: Vec<&'a [Cell<T>]>) -> Result<Self> {
        let required = shape.dof();
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() < required) {
            return Err(ShapeError::RowTooShort {
                row,
                required,
                actual: r.len(),
            });
        }
        log::trace!(
            "table view over {} rows of {} degrees of freedom",
            rows.len(),
            required
        );
        Ok(Self { shape, rows })
    }

    pub fn shape(&self) -> &'a NamedTupleShape {
        self.shape
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Record view of row `index`
    pub fn row(&self, index: usize) -> Option<RecordView<'a, T>> {
        self.rows.get(index).map(|&row| RecordView {
            shape: self.shape,
            data: &row[..self.shape.dof()],
        })
    }

    /// Record views of all rows, in order
    pub fn rows(&self) -> impl Iterator<Item = RecordView<'a, T>> + '_ {
        (0..self.len()).filter_map(|i| self.row(i))
    }

    /// Overwrite row `index` with `value`
    pub fn set_row(&self, index: usize, value: &Value<T>) -> Result<()> {
        let row = self.row(index).ok_or(ShapeError::RowOutOfBounds {
            row: index,
            len: self.len(),
        })?;
        row.assign(value)
    }

    /// Column of the field called `name`
    pub fn column(&self, name: &str) -> Option<Column<'_, T>> {
        self.shape.field(name).map(|field| Column {
            field,
            rows: &self.rows,
        })
    }

    /// All columns in field order
    pub fn columns(&self) -> impl Iterator<Item = Column<'_, T>> {
        self.shape.fields().iter().map(move |field| Column {
            field,
            rows: &self.rows,
        })
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'a str> + use<'a, T> {
        self.shape.names()
    }

    /// The row slices the view was built from
    pub fn unshape(&self) -> &[&'a [Cell<T>]] {
        &self.rows
    }

    /// Copy every column into contiguous storage
    pub fn materialize(&self) -> Result<Columns<T>> {
        Columnar::materialize(self)
    }
}

impl NamedTupleShape {
    /// Table view of `rows`, each holding one record of this shape
    pub fn apply_batched<'a, T: FlatElem>(
        &'a self,
        rows: Vec<&'a [Cell<T>]>,
    ) -> Result<TableView<'a, T>> {
        TableView::new(self, rows)
    }
}

/// One field viewed across all rows of a table
#[derive(Debug, Clone, Copy)]
pub struct Column<'t, T: FlatElem> {
    field: &'t Field,
    rows: &'t [&'t [Cell<T>]],
}

impl<'t, T: FlatElem> Column<'t, T> {
    pub fn name(&self) -> &'t str {
        self.field.name()
    }

    pub fn shape(&self) -> &'t ValueShape {
        self.field.shape()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn windows(&self) -> impl Iterator<Item = &'t [Cell<T>]> + use<'t, T> {
        let field = self.field;
        self.rows.iter().map(move |&row| field_window(field, row))
    }

    /// View of the field in row `index`
    pub fn get(&self, index: usize) -> Option<ShapedView<'t, T>> {
        self.rows
            .get(index)
            .map(|&row| self.field.shape().build_view(field_window(self.field, row)))
    }

    pub fn iter(&self) -> impl Iterator<Item = ShapedView<'t, T>> + use<'t, T> {
        let shape = self.field.shape();
        self.windows().map(move |w| shape.build_view(w))
    }

    /// Value of a real scalar column in row `index`
    pub fn scalar(&self, index: usize) -> Option<T> {
        self.get(index).and_then(|v| v.scalar())
    }

    /// Write a real scalar column in row `index`, returning the previous value
    pub fn set_scalar(&self, index: usize, value: T) -> Option<T> {
        self.get(index)
            .and_then(|v| v.as_scalar().map(|s| s.set(value)))
    }

    /// Write `value` into every row
    ///
    /// Nothing is written if `value` does not have the column's structure.
    pub fn fill(&self, value: &Value<T>) -> Result<()> {
        let actual = value.valshape()?;
        let storage = self
            .field
            .shape()
            .concretized(T::ELTYPE, T::COMPLEX_ELTYPE);
        if !actual.is_compatible_with(&storage) {
            return Err(ShapeError::incompatible(&actual, &storage));
        }
        let flat = value.to_flat();
        if flat.len() != self.field.dof() {
            return Err(ShapeError::LengthMismatch {
                expected: self.field.dof(),
                actual: flat.len(),
            });
        }
        for window in self.windows() {
            for (cell, &v) in window.iter().zip(&flat) {
                cell.set(v);
            }
        }
        Ok(())
    }

    /// Copy the column into contiguous storage
    pub fn materialize(&self) -> Result<ColumnData<T>> {
        let rows = self.len();
        match self.field.shape() {
            ValueShape::Scalar(s) if s.is_complex() => Ok(ColumnData::Complex(
                self.windows()
                    .map(|w| Complex::new(w[0].get(), w[1].get()))
                    .collect(),
            )),
            ValueShape::Scalar(_) => Ok(ColumnData::Scalar(
                self.windows().map(|w| w[0].get()).collect(),
            )),
            ValueShape::Array(a) if a.eltype().is_complex() => {
                let mut dims = a.dims().to_vec();
                dims.push(rows);
                let flat: Vec<Complex<T>> = self
                    .windows()
                    .flat_map(|w| w.chunks_exact(2).map(|c| Complex::new(c[0].get(), c[1].get())))
                    .collect();
                Ok(ColumnData::ComplexArray(ArrayD::from_shape_vec(
                    IxDyn(&dims).f(),
                    flat,
                )?))
            }
            ValueShape::Array(a) => {
                let mut dims = a.dims().to_vec();
                dims.push(rows);
                let flat: Vec<T> = self
                    .windows()
                    .flat_map(|w| w.iter().map(Cell::get))
                    .collect();
                Ok(ColumnData::Array(ArrayD::from_shape_vec(
                    IxDyn(&dims).f(),
                    flat,
                )?))
            }
            ValueShape::Const(c) => Ok(ColumnData::Const {
                value: c.value().clone(),
                rows,
            }),
            ValueShape::NamedTuple(nt) => {
                let nested = TableView::new(nt, self.windows().collect())?;
                Ok(ColumnData::Table(nested.materialize()?))
            }
        }
    }
}

/// Contiguous copy of one column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData<T> {
    Scalar(Array1<T>),
    Complex(Array1<Complex<T>>),
    /// Element extents followed by the row axis, column-major
    Array(ArrayD<T>),
    /// Same layout as `Array`, one complex number per element
    ComplexArray(ArrayD<Complex<T>>),
    Const { value: ConstValue, rows: usize },
    Table(Columns<T>),
}

impl<T> ColumnData<T> {
    pub fn as_scalar(&self) -> Option<&Array1<T>> {
        match self {
            ColumnData::Scalar(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<&Array1<Complex<T>>> {
        match self {
            ColumnData::Complex(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayD<T>> {
        match self {
            ColumnData::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_complex_array(&self) -> Option<&ArrayD<Complex<T>>> {
        match self {
            ColumnData::ComplexArray(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_const(&self) -> Option<&ConstValue> {
        match self {
            ColumnData::Const { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Columns<T>> {
        match self {
            ColumnData::Table(t) => Some(t),
            _ => None,
        }
    }
}

/// Materialized table: named columns of equal row count
#[derive(Debug, Clone, PartialEq)]
pub struct Columns<T> {
    rows: usize,
    columns: Vec<(String, ColumnData<T>)>,
}

impl<T> Columns<T> {
    pub fn get(&self, name: &str) -> Option<&ColumnData<T>> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnData<T>)> {
        self.columns.iter().map(|(n, data)| (n.as_str(), data))
    }
}

/// Anything that can hand out its data column by column
pub trait Columnar {
    type Elem: FlatElem;

    fn column_names(&self) -> Vec<String>;

    fn row_count(&self) -> usize;

    /// Copy of the column `name`, `None` if there is no such column
    fn column_data(&self, name: &str) -> Result<Option<ColumnData<Self::Elem>>>;

    /// Copy all columns
    fn materialize(&self) -> Result<Columns<Self::Elem>> {
        let names = self.column_names();
        log::debug!(
            "materializing {} columns over {} rows",
            names.len(),
            self.row_count()
        );
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            if let Some(data) = self.column_data(&name)? {
                columns.push((name, data));
            }
        }
        Ok(Columns {
            rows: self.row_count(),
            columns,
        })
    }
}

impl<T: FlatElem> Columnar for TableView<'_, T> {
    type Elem = T;

    fn column_names(&self) -> Vec<String> {
        self.shape.names().map(str::to_string).collect()
    }

    fn row_count(&self) -> usize {
        self.len()
    }

    fn column_data(&self, name: &str) -> Result<Option<ColumnData<T>>> {
        self.column(name).map(|c| c.materialize()).transpose()
    }
}

impl<T: FlatElem> Columnar for Columns<T> {
    type Elem = T;

    fn column_names(&self) -> Vec<String> {
        self.names().map(str::to_string).collect()
    }

    fn row_count(&self) -> usize {
        self.rows
    }

    fn column_data(&self, name: &str) -> Result<Option<ColumnData<T>>> {
        Ok(self.get(name).cloned())
    }
}
