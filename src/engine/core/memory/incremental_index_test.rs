use crate::engine::core::memory::aggregator::AggregatorSpec;
use crate::engine::core::memory::incremental_index::IncrementalIndex;
use crate::engine::core::memory::index_schema::{IndexSchema, MultiValueHandling};
use crate::engine::core::time::Interval;
use crate::engine::errors::IndexError;
use crate::engine::types::{MetricValue, ValueType};
use crate::shared::time::Granularity;
use crate::test_helpers::factories::{DEFAULT_TIMESTAMP, IncrementalIndexFactory, InputRowFactory};

fn dim_strings(index: &IncrementalIndex, dim: usize) -> Vec<Vec<String>> {
    index
        .facts()
        .keys()
        .map(|k| k.dim(dim).iter().map(|v| v.to_string()).collect())
        .collect()
}

#[test]
fn rollup_merges_identical_keys() {
    let row = InputRowFactory::new().with_dim("dim1", "a").create();
    let index = IncrementalIndexFactory::new()
        .with_row(row.clone())
        .with_row(row.clone())
        .with_row(row)
        .create()
        .unwrap();

    assert_eq!(index.row_count(), 1);
    assert_eq!(index.ingested_rows(), 3);
    let (_, fact) = index.facts().iter().next().unwrap();
    assert_eq!(fact.metrics, vec![MetricValue::Long(3)]);
    assert_eq!(fact.comprised, vec![0, 1, 2]);
}

#[test]
fn no_rollup_keeps_each_insertion_in_sorted_key_order() {
    let index = IncrementalIndexFactory::new()
        .no_rollup()
        .populated(DEFAULT_TIMESTAMP)
        .populated(DEFAULT_TIMESTAMP)
        .populated(DEFAULT_TIMESTAMP)
        .create()
        .unwrap();

    assert_eq!(index.row_count(), 6);
    assert_eq!(
        dim_strings(&index, 0),
        vec![vec!["1"], vec!["1"], vec!["1"], vec!["3"], vec!["3"], vec!["3"]]
    );
    let row_indexes: Vec<u32> = index.facts().iter().map(|(_, r)| r.row_index).collect();
    assert_eq!(row_indexes, vec![0, 2, 4, 1, 3, 5]);
}

#[test]
fn ingest_dictionary_ids_follow_first_seen_order() {
    let index = IncrementalIndexFactory::new()
        .with_row(InputRowFactory::new().with_dim("dim1", "z").create())
        .with_row(InputRowFactory::new().with_dim("dim1", "a").create())
        .create()
        .unwrap();
    let dict = index.dimension_dictionary("dim1").unwrap();
    assert_eq!(dict.id_of("z"), Some(0));
    assert_eq!(dict.id_of("a"), Some(1));
    assert!(index.dimension_dictionary("missing").is_none());
}

#[test]
fn granularity_truncates_timestamps_before_rollup() {
    let index = IncrementalIndexFactory::new()
        .with_granularity(Granularity::Hour)
        .with_row(
            InputRowFactory::new()
                .with_timestamp(3_600_000 + 5)
                .with_dim("d", "x")
                .create(),
        )
        .with_row(
            InputRowFactory::new()
                .with_timestamp(3_600_000 + 59_000)
                .with_dim("d", "x")
                .create(),
        )
        .create()
        .unwrap();

    assert_eq!(index.row_count(), 1);
    assert_eq!(index.facts().min_timestamp(), Some(3_600_000));
    assert_eq!(index.interval(), Interval::new(3_600_000, 7_200_000).unwrap());
}

#[test]
fn interval_of_empty_index_is_empty() {
    let index = IncrementalIndex::new(IndexSchema::builder().with_min_timestamp(50).build().unwrap());
    assert!(index.interval().is_empty());
    assert_eq!(index.interval().start(), 50);
}

#[test]
fn rejects_rows_below_min_timestamp() {
    let mut index =
        IncrementalIndex::new(IndexSchema::builder().with_min_timestamp(1000).build().unwrap());
    let err = index
        .add(&InputRowFactory::new().with_timestamp(999).create())
        .unwrap_err();
    assert_eq!(err, IndexError::TimestampOutOfRange(999));
    assert!(index.is_empty());
}

#[test]
fn full_index_rejects_new_keys_but_still_rolls_up() {
    let mut index = IncrementalIndexFactory::new()
        .with_max_rows(1)
        .with_row(InputRowFactory::new().with_dim("d", "a").create())
        .create()
        .unwrap();

    let err = index
        .add(&InputRowFactory::new().with_dim("d", "b").create())
        .unwrap_err();
    assert_eq!(err, IndexError::IndexFull(1));

    assert_eq!(
        index
            .add(&InputRowFactory::new().with_dim("d", "a").create())
            .unwrap(),
        1
    );
    assert_eq!(index.ingested_rows(), 2);
}

#[test]
fn schemaless_discovers_dimensions_in_row_order() {
    let index = IncrementalIndexFactory::new()
        .with_row(InputRowFactory::new().with_dim("b", "1").create())
        .with_row(
            InputRowFactory::new()
                .with_dim("a", "1")
                .with_dim("b", "1")
                .create(),
        )
        .create()
        .unwrap();

    assert_eq!(index.dimension_names().collect::<Vec<_>>(), vec!["b", "a"]);
    // the first row has no `a`, so it is a distinct key
    assert_eq!(index.row_count(), 2);
}

#[test]
fn later_dimension_null_rolls_up_with_earlier_rows() {
    let index = IncrementalIndexFactory::new()
        .with_row(InputRowFactory::new().with_dim("a", "1").create())
        .with_row(InputRowFactory::new().with_dim("b", "x").create())
        .with_row(InputRowFactory::new().with_dim("a", "1").create())
        .create()
        .unwrap();

    assert_eq!(index.row_count(), 2);
}

#[test]
fn declared_dimensions_ignore_unknown_columns() {
    let index = IncrementalIndexFactory::new()
        .with_dimensions(&["dim1"])
        .with_row(
            InputRowFactory::new()
                .with_dim("dim1", "1")
                .with_dim("other", "x")
                .create(),
        )
        .create()
        .unwrap();

    assert_eq!(index.dimension_names().collect::<Vec<_>>(), vec!["dim1"]);
    assert!(index.dimension("other").is_none());
}

#[test]
fn multi_value_dimensions_are_sorted_and_flagged() {
    let index = IncrementalIndexFactory::new()
        .with_row(
            InputRowFactory::new()
                .with_multi_dim("tags", &["b", "a", "b"])
                .create(),
        )
        .create()
        .unwrap();

    assert_eq!(dim_strings(&index, 0), vec![vec!["a", "b", "b"]]);
    assert!(index.dimension("tags").unwrap().has_multiple_values());
    assert!(index.capabilities("tags").unwrap().has_multiple_values);
}

#[test]
fn sorted_set_handling_drops_duplicates() {
    let schema = IndexSchema::builder()
        .with_multi_value_handling(MultiValueHandling::SortedSet)
        .build()
        .unwrap();
    let mut index = IncrementalIndex::new(schema);
    index
        .add(
            &InputRowFactory::new()
                .with_multi_dim("tags", &["b", "a", "b"])
                .create(),
        )
        .unwrap();
    assert_eq!(dim_strings(&index, 0), vec![vec!["a", "b"]]);
}

#[test]
fn metric_capabilities_and_aggregation() {
    let index = IncrementalIndexFactory::new()
        .with_metric(AggregatorSpec::double_sum("total", "value"))
        .with_row(InputRowFactory::new().with_dim("d", "x").with_metric("value", 1.5).create())
        .with_row(InputRowFactory::new().with_dim("d", "x").with_metric("value", 2.0).create())
        .create()
        .unwrap();

    let (_, fact) = index.facts().iter().next().unwrap();
    assert_eq!(
        fact.metrics,
        vec![MetricValue::Long(2), MetricValue::Double(3.5)]
    );
    assert_eq!(
        index.capabilities("total").unwrap().value_type,
        ValueType::Double
    );
    assert_eq!(index.capabilities("count").unwrap().value_type, ValueType::Long);
    assert!(index.capabilities("missing").is_none());
}

#[test]
fn truncation_near_minimum_timestamp_keeps_key_order() {
    let index = IncrementalIndexFactory::new()
        .with_granularity(Granularity::Second)
        .with_row(InputRowFactory::new().with_timestamp(0).create())
        .with_row(InputRowFactory::new().with_timestamp(i64::MIN + 1).create())
        .create()
        .unwrap();

    let timestamps: Vec<i64> = index.facts().keys().map(|k| k.timestamp()).collect();
    assert_eq!(timestamps, vec![i64::MIN, 0]);
    assert_eq!(index.interval(), Interval::new(i64::MIN, 1_000).unwrap());
}

#[test]
fn rejects_rows_once_row_indexes_are_exhausted() {
    let mut index = IncrementalIndexFactory::new()
        .with_row(InputRowFactory::new().with_dim("d", "a").create())
        .create()
        .unwrap();
    index.set_next_row_index(u32::MAX - 1);

    // rolls up into the existing row and takes the last index
    assert_eq!(
        index
            .add(&InputRowFactory::new().with_dim("d", "a").create())
            .unwrap(),
        1
    );
    let err = index
        .add(&InputRowFactory::new().with_dim("d", "a").create())
        .unwrap_err();
    assert_eq!(err, IndexError::RowIndexOverflow(u32::MAX));

    let (_, fact) = index.facts().iter().next().unwrap();
    assert_eq!(fact.comprised, vec![0, u32::MAX - 1]);
    assert_eq!(fact.metrics, vec![MetricValue::Long(2)]);
}

#[test]
fn rejected_rows_leave_facts_unchanged() {
    crate::logging::init_for_tests();
    let mut index = IncrementalIndexFactory::new()
        .with_max_rows(1)
        .with_row(InputRowFactory::new().with_dim("d", "a").create())
        .create()
        .unwrap();
    let before: Vec<_> = index.facts().keys().cloned().collect();

    for row in [
        InputRowFactory::new().with_dim("d", "b").create(),
        InputRowFactory::new().with_dim("d", "c").create(),
    ] {
        assert_eq!(index.add(&row).unwrap_err(), IndexError::IndexFull(1));
    }
    assert_eq!(index.facts().keys().cloned().collect::<Vec<_>>(), before);
    assert_eq!(index.ingested_rows(), 1);
}
