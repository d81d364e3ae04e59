use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::engine::core::memory::time_and_dims::TimeAndDims;
use crate::engine::types::MetricValue;

/// Metrics and provenance of one fact table entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FactRow {
    /// Insertion index of the first input row that created this entry.
    pub row_index: u32,
    pub metrics: Vec<MetricValue>,
    /// Insertion indexes of every input row folded into this entry, ascending.
    pub comprised: Vec<u32>,
}

/// Key-ordered map from [`TimeAndDims`] to aggregated metrics.
#[derive(Debug, Default, Clone)]
pub struct FactTable {
    facts: BTreeMap<TimeAndDims, FactRow>,
}

impl FactTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn get(&self, key: &TimeAndDims) -> Option<&FactRow> {
        self.facts.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &TimeAndDims) -> Option<&mut FactRow> {
        self.facts.get_mut(key)
    }

    pub(crate) fn insert(&mut self, key: TimeAndDims, row: FactRow) {
        self.facts.insert(key, row);
    }

    /// Forward iteration in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, TimeAndDims, FactRow> {
        self.facts.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, TimeAndDims, FactRow> {
        self.facts.keys()
    }

    pub fn min_timestamp(&self) -> Option<i64> {
        self.facts.keys().next().map(TimeAndDims::timestamp)
    }

    pub fn max_timestamp(&self) -> Option<i64> {
        self.facts.keys().next_back().map(TimeAndDims::timestamp)
    }
}

impl<'a> IntoIterator for &'a FactTable {
    type Item = (&'a TimeAndDims, &'a FactRow);
    type IntoIter = btree_map::Iter<'a, TimeAndDims, FactRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
