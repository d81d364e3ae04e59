use ahash::AHashMap;
use tracing::trace;

use crate::engine::core::memory::aggregator::AggregatorSpec;
use crate::engine::core::memory::dimension_dictionary::DimensionDictionary;
use crate::engine::core::memory::fact_table::{FactRow, FactTable};
use crate::engine::core::memory::index_schema::IndexSchema;
use crate::engine::core::memory::input_row::InputRow;
use crate::engine::core::memory::time_and_dims::TimeAndDims;
use crate::engine::core::time::Interval;
use crate::engine::errors::IndexError;
use crate::engine::types::{ColumnCapabilities, DimValue};

/// Ingest-side state of one dimension.
#[derive(Debug, Clone)]
pub struct DimensionDesc {
    name: String,
    index: usize,
    dictionary: DimensionDictionary,
    has_multiple_values: bool,
}

impl DimensionDesc {
    fn new(name: String, index: usize) -> Self {
        Self {
            name,
            index,
            dictionary: DimensionDictionary::new(),
            has_multiple_values: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn dictionary(&self) -> &DimensionDictionary {
        &self.dictionary
    }

    pub fn has_multiple_values(&self) -> bool {
        self.has_multiple_values
    }
}

/// Mutable, append-only in-memory index.
///
/// Rows are dictionary-encoded on the way in and land in a key-ordered [`FactTable`].
/// With rollup, rows sharing a truncated timestamp and dimension values are aggregated
/// into one entry; without it, every row keeps its own entry, keyed additionally by its
/// insertion index.
#[derive(Debug)]
pub struct IncrementalIndex {
    schema: IndexSchema,
    dimensions: Vec<DimensionDesc>,
    positions: AHashMap<String, usize>,
    facts: FactTable,
    next_row_index: u32,
}

impl IncrementalIndex {
    pub fn new(schema: IndexSchema) -> Self {
        let mut index = Self {
            dimensions: Vec::with_capacity(schema.dimensions.len()),
            positions: AHashMap::new(),
            facts: FactTable::new(),
            next_row_index: 0,
            schema,
        };
        let declared = index.schema.dimensions.clone();
        for name in declared {
            index.register_dimension(&name);
        }
        index
    }

    fn register_dimension(&mut self, name: &str) -> usize {
        if let Some(pos) = self.positions.get(name) {
            return *pos;
        }
        let pos = self.dimensions.len();
        self.dimensions.push(DimensionDesc::new(name.to_string(), pos));
        self.positions.insert(name.to_string(), pos);
        pos
    }

    /// Adds one row and returns the number of fact rows afterwards. Rejected rows leave
    /// the fact table unchanged and are logged.
    pub fn add(&mut self, row: &InputRow) -> Result<usize, IndexError> {
        self.try_add(row).inspect_err(IndexError::log_error)
    }

    fn try_add(&mut self, row: &InputRow) -> Result<usize, IndexError> {
        let Some(next_row_index) = self.next_row_index.checked_add(1) else {
            return Err(IndexError::RowIndexOverflow(self.next_row_index));
        };
        if row.timestamp() < self.schema.min_timestamp {
            return Err(IndexError::TimestampOutOfRange(row.timestamp()));
        }
        let timestamp = self.schema.granularity.bucket_start(row.timestamp());

        if self.schema.is_schemaless() {
            for name in row.dimension_names() {
                self.register_dimension(name);
            }
        }

        let dims = self.encode_dims(row);
        let row_index = self.next_row_index;

        let key = if self.schema.rollup {
            TimeAndDims::new(timestamp, dims, None)
        } else {
            TimeAndDims::new(timestamp, dims, Some(row_index))
        };

        if let Some(existing) = self.facts.get_mut(&key) {
            for (spec, state) in self.schema.metrics.iter().zip(existing.metrics.iter_mut()) {
                spec.aggregate(state, row);
            }
            existing.comprised.push(row_index);
        } else {
            if self.facts.len() >= self.schema.max_rows {
                return Err(IndexError::IndexFull(self.schema.max_rows));
            }
            let metrics = self
                .schema
                .metrics
                .iter()
                .map(|spec| {
                    let mut state = spec.init();
                    spec.aggregate(&mut state, row);
                    state
                })
                .collect();
            self.facts.insert(
                key,
                FactRow {
                    row_index,
                    metrics,
                    comprised: vec![row_index],
                },
            );
        }

        self.next_row_index = next_row_index;
        trace!(row_index, timestamp, facts = self.facts.len(), "Added row");
        Ok(self.facts.len())
    }

    fn encode_dims(&mut self, row: &InputRow) -> Vec<Vec<DimValue>> {
        let handling = self.schema.multi_value_handling;
        self.dimensions
            .iter_mut()
            .map(|desc| {
                let mut values: Vec<&str> =
                    row.dimension(&desc.name).iter().map(String::as_str).collect();
                handling.apply(&mut values);
                if values.len() > 1 {
                    desc.has_multiple_values = true;
                }
                values
                    .into_iter()
                    .map(|v| desc.dictionary.add(v).1)
                    .collect()
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn set_next_row_index(&mut self, next_row_index: u32) {
        self.next_row_index = next_row_index;
    }

    pub fn schema(&self) -> &IndexSchema {
        &self.schema
    }

    pub fn facts(&self) -> &FactTable {
        &self.facts
    }

    pub fn is_rollup(&self) -> bool {
        self.schema.rollup
    }

    /// Number of fact rows.
    pub fn row_count(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Number of input rows accepted so far, before rollup.
    pub fn ingested_rows(&self) -> u32 {
        self.next_row_index
    }

    pub fn dimensions(&self) -> &[DimensionDesc] {
        &self.dimensions
    }

    pub fn dimension_names(&self) -> impl Iterator<Item = &str> {
        self.dimensions.iter().map(DimensionDesc::name)
    }

    pub fn dimension(&self, name: &str) -> Option<&DimensionDesc> {
        self.positions.get(name).map(|pos| &self.dimensions[*pos])
    }

    /// Ingest-side dictionary of `name`, in first-seen id order.
    pub fn dimension_dictionary(&self, name: &str) -> Option<&DimensionDictionary> {
        self.dimension(name).map(DimensionDesc::dictionary)
    }

    pub fn metric_specs(&self) -> &[AggregatorSpec] {
        &self.schema.metrics
    }

    pub fn capabilities(&self, column: &str) -> Option<ColumnCapabilities> {
        if let Some(desc) = self.dimension(column) {
            return Some(ColumnCapabilities::dimension(desc.has_multiple_values));
        }
        self.schema
            .metrics
            .iter()
            .find(|m| m.name() == column)
            .map(|m| ColumnCapabilities::metric(m.value_type()))
    }

    /// Span of the ingested data: from the first bucket start to the end of the last
    /// bucket. Empty at `min_timestamp` when no rows have been added.
    pub fn interval(&self) -> Interval {
        match (self.facts.min_timestamp(), self.facts.max_timestamp()) {
            (Some(min), Some(max)) => {
                Interval::covering(min, self.schema.granularity.bucket_end(max))
            }
            _ => Interval::covering(self.schema.min_timestamp, self.schema.min_timestamp),
        }
    }
}
