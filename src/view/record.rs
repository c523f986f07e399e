//! Record views over named tuple shapes

use super::ShapedView;
use crate::error::Result;
use crate::shape::{Field, NamedTupleShape};
use crate::types::{FlatElem, Value};
use std::cell::Cell;

/// View of a flat buffer as a record with named fields
///
/// Each field is itself a view into the field's range of the buffer;
/// constant fields yield their stored value.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a, T: FlatElem> {
    pub(crate) shape: &'a NamedTupleShape,
    pub(crate) data: &'a [Cell<T>],
}

impl<'a, T: FlatElem> RecordView<'a, T> {
    pub fn shape(&self) -> &'a NamedTupleShape {
        self.shape
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.shape.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'a str> + use<'a, T> {
        self.shape.names()
    }

    fn field_view(&self, field: &'a Field) -> ShapedView<'a, T> {
        let window = match field.offset() {
            Some(o) => &self.data[o..o + field.dof()],
            None => &self.data[..0],
        };
        field.shape().build_view(window)
    }

    /// View of the field called `name`
    pub fn field(&self, name: &str) -> Option<ShapedView<'a, T>> {
        self.shape.field(name).map(|f| self.field_view(f))
    }

    /// All fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&'a str, ShapedView<'a, T>)> + '_ {
        self.shape
            .fields()
            .iter()
            .map(move |f| (f.name(), self.field_view(f)))
    }

    /// Value of a scalar field
    pub fn get_scalar(&self, name: &str) -> Option<T> {
        self.field(name).and_then(|v| v.scalar())
    }

    /// Write a scalar field, returning the previous value
    ///
    /// Returns `None` (and writes nothing) if there is no scalar field `name`.
    pub fn set_scalar(&self, name: &str, value: T) -> Option<T> {
        self.field(name)
            .and_then(|v| v.as_scalar().map(|s| s.set(value)))
    }

    /// The whole backing window
    pub fn unshape(&self) -> &'a [Cell<T>] {
        self.data
    }

    pub fn to_value(&self) -> Result<Value<T>> {
        ShapedView::Record(*self).to_value()
    }

    pub fn assign(&self, value: &Value<T>) -> Result<()> {
        ShapedView::Record(*self).assign(value)
    }
}
