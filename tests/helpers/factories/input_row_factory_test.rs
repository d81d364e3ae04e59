use crate::test_helpers::factories::{DEFAULT_TIMESTAMP, InputRowFactory};

#[test]
fn creates_row_with_defaults_and_overrides() {
    let row = InputRowFactory::new()
        .with_dim("dim1", "1")
        .with_multi_dim("tags", &["a", "b"])
        .with_metric("bytes", 10)
        .create();

    assert_eq!(row.timestamp(), DEFAULT_TIMESTAMP);
    assert_eq!(row.dimension("dim1"), &["1".to_string()]);
    assert_eq!(row.dimension("tags").len(), 2);
    assert_eq!(row.metric("bytes").map(|m| m.as_i64()), Some(10));
}

#[test]
fn create_list_spreads_rows_within_an_hour() {
    let rows = InputRowFactory::new().create_list(20);
    assert_eq!(rows.len(), 20);
    for (i, row) in rows.iter().enumerate() {
        assert!(row.timestamp() >= DEFAULT_TIMESTAMP);
        assert!(row.timestamp() < DEFAULT_TIMESTAMP + 3_600_000);
        assert_eq!(row.dimension("dim1"), &[format!("v{}", i)]);
    }
}
