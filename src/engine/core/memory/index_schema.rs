use std::collections::HashSet;
use std::str::FromStr;

use crate::engine::core::memory::aggregator::AggregatorSpec;
use crate::engine::errors::IndexError;
use crate::shared::config::{CONFIG, IndexConfig};
use crate::shared::time::Granularity;

/// Row numbers and insertion indexes are `u32`.
pub const MAX_ROWS_LIMIT: usize = u32::MAX as usize;

/// How the values of a multi-value dimension are stored within one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultiValueHandling {
    /// Sorted, duplicates kept.
    #[default]
    SortedArray,
    /// Sorted, duplicates dropped.
    SortedSet,
    /// Input order, duplicates kept.
    Array,
}

impl MultiValueHandling {
    pub fn apply(&self, values: &mut Vec<&str>) {
        match self {
            MultiValueHandling::SortedArray => values.sort_unstable(),
            MultiValueHandling::SortedSet => {
                values.sort_unstable();
                values.dedup();
            }
            MultiValueHandling::Array => {}
        }
    }
}

impl FromStr for MultiValueHandling {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sorted_array" => Ok(MultiValueHandling::SortedArray),
            "sorted_set" => Ok(MultiValueHandling::SortedSet),
            "array" => Ok(MultiValueHandling::Array),
            _ => Err(IndexError::InvalidMultiValueHandling(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexSchema {
    pub min_timestamp: i64,
    pub granularity: Granularity,
    /// Declared dimensions. Empty means dimensions are discovered from the rows.
    pub dimensions: Vec<String>,
    pub metrics: Vec<AggregatorSpec>,
    pub rollup: bool,
    pub max_rows: usize,
    pub multi_value_handling: MultiValueHandling,
}

impl IndexSchema {
    pub fn builder() -> IndexSchemaBuilder {
        IndexSchemaBuilder::new()
    }

    pub fn is_schemaless(&self) -> bool {
        self.dimensions.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct IndexSchemaBuilder {
    min_timestamp: i64,
    granularity: Granularity,
    dimensions: Vec<String>,
    metrics: Vec<AggregatorSpec>,
    rollup: bool,
    max_rows: usize,
    multi_value_handling: MultiValueHandling,
}

impl Default for IndexSchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexSchemaBuilder {
    pub fn new() -> Self {
        Self {
            min_timestamp: i64::MIN,
            granularity: Granularity::None,
            dimensions: Vec::new(),
            metrics: Vec::new(),
            rollup: true,
            max_rows: usize::MAX,
            multi_value_handling: MultiValueHandling::SortedArray,
        }
    }

    /// Starts from the `[index]` configuration section.
    pub fn from_config(cfg: &IndexConfig) -> Result<Self, IndexError> {
        Ok(Self::new()
            .with_rollup(cfg.rollup)
            .with_max_rows(cfg.max_rows_in_memory)
            .with_granularity(cfg.query_granularity.parse()?)
            .with_multi_value_handling(cfg.multi_value_handling.parse()?))
    }

    /// Starts from the process-wide configuration.
    pub fn from_settings() -> Result<Self, IndexError> {
        Self::from_config(&CONFIG.index)
    }

    pub fn with_min_timestamp(mut self, min_timestamp: i64) -> Self {
        self.min_timestamp = min_timestamp;
        self
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_dimensions<I, S>(mut self, dimensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dimensions = dimensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_metric(mut self, metric: AggregatorSpec) -> Self {
        self.metrics.push(metric);
        self
    }

    pub fn with_rollup(mut self, rollup: bool) -> Self {
        self.rollup = rollup;
        self
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn with_multi_value_handling(mut self, handling: MultiValueHandling) -> Self {
        self.multi_value_handling = handling;
        self
    }

    pub fn build(self) -> Result<IndexSchema, IndexError> {
        let mut metric_names = HashSet::new();
        for metric in &self.metrics {
            if !metric_names.insert(metric.name()) {
                return Err(IndexError::DuplicateMetric(metric.name().to_string()));
            }
        }

        let mut dim_names = HashSet::new();
        for dim in &self.dimensions {
            if !dim_names.insert(dim.as_str()) {
                return Err(IndexError::DuplicateDimension(dim.clone()));
            }
            if metric_names.contains(dim.as_str()) {
                return Err(IndexError::DimensionMetricConflict(dim.clone()));
            }
        }

        Ok(IndexSchema {
            min_timestamp: self.min_timestamp,
            granularity: self.granularity,
            dimensions: self.dimensions,
            metrics: self.metrics,
            rollup: self.rollup,
            max_rows: self.max_rows.min(MAX_ROWS_LIMIT),
            multi_value_handling: self.multi_value_handling,
        })
    }
}
