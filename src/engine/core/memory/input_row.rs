use indexmap::IndexMap;
use std::collections::HashMap;

use crate::engine::types::MetricValue;

/// A raw row handed to the in-memory index.
///
/// Dimension order is preserved; schemaless indexes discover new dimensions in the order
/// rows present them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputRow {
    timestamp: i64,
    dims: IndexMap<String, Vec<String>>,
    metrics: HashMap<String, MetricValue>,
}

impl InputRow {
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            ..Default::default()
        }
    }

    pub fn with_dim(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.dims.insert(name.into(), vec![value.into()]);
        self
    }

    pub fn with_multi_dim<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dims
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.metrics.insert(name.into(), value.into());
        self
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn dimension_names(&self) -> impl Iterator<Item = &str> {
        self.dims.keys().map(String::as_str)
    }

    /// Values for `name`; empty when the row does not carry it.
    pub fn dimension(&self, name: &str) -> &[String] {
        self.dims.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn metric(&self, name: &str) -> Option<MetricValue> {
        self.metrics.get(name).copied()
    }
}
