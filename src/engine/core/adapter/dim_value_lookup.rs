use std::collections::BTreeSet;

use crate::engine::types::DimValue;

/// Sorted dictionary of one dimension: dense 0-based codes in ascending value order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimValueLookup {
    values: Vec<DimValue>,
}

/// Lookup returned for dimensions absent from a row set.
pub static EMPTY_LOOKUP: DimValueLookup = DimValueLookup { values: Vec::new() };

impl DimValueLookup {
    pub fn from_sorted_set(values: BTreeSet<DimValue>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = DimValue>,
    {
        Self::from_sorted_set(values.into_iter().collect())
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value_at(&self, code: u32) -> Option<&str> {
        self.values.get(code as usize).map(|v| &**v)
    }

    pub fn code_of(&self, value: &str) -> Option<u32> {
        self.values
            .binary_search_by(|probe| (**probe).cmp(value))
            .ok()
            .map(|pos| pos as u32)
    }

    pub fn values(&self) -> &[DimValue] {
        &self.values
    }

    /// `(code, value)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.values
            .iter()
            .enumerate()
            .map(|(code, v)| (code as u32, &**v))
    }

    /// Codes for `values`, in the given order. Values unknown to the lookup are skipped.
    pub fn encode(&self, values: &[DimValue]) -> Vec<u32> {
        values.iter().filter_map(|v| self.code_of(v)).collect()
    }
}
