use crate::engine::core::memory::time_and_dims::TimeAndDims;
use crate::engine::types::DimValue;

fn dims(values: &[&[&str]]) -> Vec<Vec<DimValue>> {
    values
        .iter()
        .map(|d| d.iter().map(|v| DimValue::from(*v)).collect())
        .collect()
}

#[test]
fn orders_by_timestamp_first() {
    let early = TimeAndDims::new(1, dims(&[&["z"]]), None);
    let late = TimeAndDims::new(2, dims(&[&["a"]]), None);
    assert!(early < late);
}

#[test]
fn orders_dims_by_value_then_row_index() {
    let a = TimeAndDims::new(5, dims(&[&["1"], &["2"]]), Some(4));
    let b = TimeAndDims::new(5, dims(&[&["1"], &["2"]]), Some(7));
    let c = TimeAndDims::new(5, dims(&[&["3"], &["4"]]), Some(0));
    assert!(a < b);
    assert!(b < c);
}

#[test]
fn null_dimension_sorts_before_values() {
    let null = TimeAndDims::new(5, dims(&[&[], &["x"]]), None);
    let set = TimeAndDims::new(5, dims(&[&["a"], &["x"]]), None);
    assert!(null < set);
}

#[test]
fn trailing_nulls_are_trimmed() {
    let short = TimeAndDims::new(5, dims(&[&["a"]]), None);
    let padded = TimeAndDims::new(5, dims(&[&["a"], &[], &[]]), None);
    assert_eq!(short, padded);
    assert_eq!(padded.dims().len(), 1);
    assert!(padded.dim(2).is_empty());
}
