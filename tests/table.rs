//! Integration tests for batched (table) views
//!
//! These tests treat a batch of flat parameter vectors as a table of records.

mod common;

use flatshape::{
    ColumnData, Columnar, ConstValue, ElType, ErrorKind, FlatBatch, NamedTupleShape, ShapeError,
    Value, ValueShape, allocate_batch, as_cells,
};
use ndarray::array;

fn point_shape() -> NamedTupleShape {
    NamedTupleShape::new([
        ("a", ValueShape::scalar(ElType::Real)),
        ("b", ValueShape::array(ElType::Real, [2]).unwrap()),
        ("label", ValueShape::constant(7i64)),
    ])
    .unwrap()
}

// =============================================================================
// Rows and columns
// =============================================================================

#[test]
fn column_writes_mutate_rows() {
    common::init_logging();
    let shape = point_shape();
    let mut rows: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64, 0.0, 0.0]).collect();
    {
        let cells: Vec<_> = rows.iter_mut().map(|r| as_cells(r)).collect();
        let table = shape.apply_batched(cells).unwrap();
        assert_eq!(table.len(), 10);

        let a = table.column("a").unwrap();
        assert_eq!(a.len(), 10);
        assert_eq!(a.scalar(3), Some(3.0));
        assert_eq!(a.set_scalar(3, 9.9), Some(3.0));
        assert_eq!(table.row(3).unwrap().get_scalar("a"), Some(9.9));
    }
    assert_eq!(rows[3][0], 9.9);
}

#[test]
fn short_row_is_rejected() {
    let shape = point_shape();
    let mut good = vec![0.0; 3];
    let mut short = vec![0.0; 1];
    let err = shape
        .apply_batched(vec![as_cells(&mut good), as_cells(&mut short)])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Mismatch);
    assert!(matches!(err, ShapeError::RowTooShort { row: 1, .. }));
}

#[test]
fn rows_iterate_as_records() {
    let shape = point_shape();
    let mut batch = FlatBatch::new(shape.dof());
    for i in 0..4 {
        let x = i as f64;
        batch.push(&[x, x * 10.0, x * 100.0]).unwrap();
    }
    let table = batch.table(&shape).unwrap();
    let sums: Vec<f64> = table
        .rows()
        .map(|r| {
            let b = r.field("b").unwrap().as_array().unwrap();
            r.get_scalar("a").unwrap() + b.get(&[0]).unwrap() + b.get(&[1]).unwrap()
        })
        .collect();
    assert_eq!(sums, vec![0.0, 111.0, 222.0, 333.0]);
    assert_eq!(
        table.column_names().collect::<Vec<_>>(),
        vec!["a", "b", "label"]
    );
}

// =============================================================================
// Materialization
// =============================================================================

#[test]
fn materialized_columns_are_contiguous() {
    common::init_logging();
    let shape = point_shape();
    let mut batch: FlatBatch<f64> = allocate_batch(&ValueShape::from(shape.clone()), 0);
    batch.push(&[1.0, 2.0, 3.0]).unwrap();
    batch.push(&[4.0, 5.0, 6.0]).unwrap();
    let table = batch.table(&shape).unwrap();
    let columns = table.materialize().unwrap();

    assert_eq!(columns.row_count(), 2);
    assert_eq!(columns.len(), 3);
    assert_eq!(
        columns.get("a"),
        Some(&ColumnData::Scalar(array![1.0, 4.0]))
    );
    assert_eq!(
        columns.get("b").unwrap().as_array().unwrap(),
        &array![[2.0, 5.0], [3.0, 6.0]].into_dyn()
    );
    assert_eq!(
        columns.get("label"),
        Some(&ColumnData::Const {
            value: ConstValue::Int(7),
            rows: 2
        })
    );
}

fn total_rows(source: &impl Columnar) -> usize {
    source.row_count()
}

#[test]
fn columnar_sources_agree() {
    let shape = point_shape();
    let mut batch: FlatBatch<f64> = FlatBatch::with_len(shape.dof(), 5);
    let table = batch.table(&shape).unwrap();
    table.column("a").unwrap().fill(&Value::Scalar(2.0)).unwrap();

    let columns = table.materialize().unwrap();
    assert_eq!(total_rows(&table), 5);
    assert_eq!(total_rows(&columns), 5);
    assert_eq!(
        table.column_data("a").unwrap(),
        columns.column_data("a").unwrap()
    );
    assert_eq!(
        columns.get("a").unwrap().as_scalar().unwrap(),
        &array![2.0, 2.0, 2.0, 2.0, 2.0]
    );
}

#[test]
fn set_row_writes_one_record() {
    let shape = point_shape();
    let mut batch: FlatBatch<f64> = FlatBatch::with_len(shape.dof(), 2);
    {
        let table = batch.table(&shape).unwrap();
        let record = Value::Record(vec![
            ("a".into(), Value::Scalar(1.0)),
            ("b".into(), Value::Array(array![2.0, 3.0].into_dyn())),
            ("label".into(), Value::Const(7i64.into())),
        ]);
        table.set_row(0, &record).unwrap();
        assert_eq!(table.row(0).unwrap().to_value().unwrap(), record);
    }
    assert_eq!(batch.record(0), Some(&[1.0, 2.0, 3.0][..]));
    assert_eq!(batch.record(1), Some(&[0.0, 0.0, 0.0][..]));
}
