use crate::test_helpers::factories::{DEFAULT_TIMESTAMP, IncrementalIndexFactory};

#[test]
fn populated_fixture_has_two_facts() {
    let index = IncrementalIndexFactory::new()
        .populated(DEFAULT_TIMESTAMP)
        .create()
        .unwrap();
    assert_eq!(index.row_count(), 2);
    assert!(index.is_rollup());
    assert_eq!(index.dimension_names().collect::<Vec<_>>(), vec!["dim1", "dim2"]);
}

#[test]
fn repeated_population_without_rollup_keeps_every_row() {
    let index = IncrementalIndexFactory::new()
        .no_rollup()
        .populated(DEFAULT_TIMESTAMP)
        .populated(DEFAULT_TIMESTAMP)
        .create()
        .unwrap();
    assert_eq!(index.row_count(), 4);
}
