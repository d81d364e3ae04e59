use crate::engine::core::{AggregatorSpec, IncrementalIndex, IndexSchema, IndexSchemaBuilder, InputRow};
use crate::engine::errors::IndexError;
use crate::shared::time::Granularity;
use crate::test_helpers::factories::InputRowFactory;

/// Factory to build populated IncrementalIndex instances for testing.
///
/// Defaults to a schemaless rollup index with a single `count` metric.
pub struct IncrementalIndexFactory {
    schema: IndexSchemaBuilder,
    rows: Vec<InputRow>,
}

impl IncrementalIndexFactory {
    pub fn new() -> Self {
        Self {
            schema: IndexSchema::builder().with_metric(AggregatorSpec::count("count")),
            rows: vec![],
        }
    }

    pub fn no_rollup(mut self) -> Self {
        self.schema = self.schema.with_rollup(false);
        self
    }

    pub fn with_dimensions(mut self, dims: &[&str]) -> Self {
        self.schema = self.schema.with_dimensions(dims.iter().copied());
        self
    }

    pub fn with_metric(mut self, metric: AggregatorSpec) -> Self {
        self.schema = self.schema.with_metric(metric);
        self
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.schema = self.schema.with_granularity(granularity);
        self
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.schema = self.schema.with_max_rows(max_rows);
        self
    }

    pub fn with_row(mut self, row: InputRow) -> Self {
        self.rows.push(row);
        self
    }

    pub fn with_rows(mut self, rows: Vec<InputRow>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Adds the two-row fixture `(dim1=1, dim2=2)`, `(dim1=3, dim2=4)` at `timestamp`.
    pub fn populated(self, timestamp: i64) -> Self {
        let base = InputRowFactory::new().with_timestamp(timestamp);
        self.with_row(base.clone().with_dim("dim1", "1").with_dim("dim2", "2").create())
            .with_row(base.with_dim("dim1", "3").with_dim("dim2", "4").create())
    }

    pub fn create(self) -> Result<IncrementalIndex, IndexError> {
        let mut index = IncrementalIndex::new(self.schema.build()?);
        for row in &self.rows {
            index.add(row)?;
        }
        Ok(index)
    }
}
