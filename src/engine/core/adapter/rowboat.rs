use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use crate::engine::core::adapter::dim_value_lookup::DimValueLookup;
use crate::engine::types::MetricValue;
use crate::shared::time::format_millis_utc;

/// One output row: numbered, dictionary-encoded, ready for a segment writer.
///
/// `dims[i]` holds the sorted-dictionary codes of dimension `i` (empty when null).
/// `comprised_rows` maps a source index number to the source rows folded into this row.
#[derive(Debug, Clone)]
pub struct Rowboat<'a> {
    row_num: u32,
    timestamp: i64,
    dims: Vec<Vec<u32>>,
    metrics: Cow<'a, [MetricValue]>,
    comprised_rows: BTreeMap<u32, Vec<u32>>,
    lookups: &'a [DimValueLookup],
}

impl<'a> Rowboat<'a> {
    pub fn new(
        row_num: u32,
        timestamp: i64,
        dims: Vec<Vec<u32>>,
        metrics: Cow<'a, [MetricValue]>,
        comprised_rows: BTreeMap<u32, Vec<u32>>,
        lookups: &'a [DimValueLookup],
    ) -> Self {
        Self {
            row_num,
            timestamp,
            dims,
            metrics,
            comprised_rows,
            lookups,
        }
    }

    pub fn row_num(&self) -> u32 {
        self.row_num
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn dims(&self) -> &[Vec<u32>] {
        &self.dims
    }

    /// Codes of dimension `index`; empty when null.
    pub fn dim_codes(&self, index: usize) -> &[u32] {
        self.dims.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Decoded values of dimension `index`.
    pub fn dim_values(&self, index: usize) -> impl Iterator<Item = &'a str> + '_ {
        let lookup = self.lookups.get(index);
        self.dim_codes(index)
            .iter()
            .filter_map(move |code| lookup.and_then(|l| l.value_at(*code)))
    }

    pub fn metrics(&self) -> &[MetricValue] {
        &self.metrics
    }

    pub fn into_metrics(self) -> Vec<MetricValue> {
        self.metrics.into_owned()
    }

    pub fn comprised_rows(&self) -> &BTreeMap<u32, Vec<u32>> {
        &self.comprised_rows
    }
}

impl PartialEq for Rowboat<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.row_num == other.row_num
            && self.timestamp == other.timestamp
            && self.dims == other.dims
            && self.metrics == other.metrics
            && self.comprised_rows == other.comprised_rows
    }
}

fn write_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("]")
}

/// `Rowboat{timestamp=<ISO-8601>, dims=[[v, ...], ...], metrics=[...], comprisedRows={...}}`
impl fmt::Display for Rowboat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rowboat{{timestamp={}, dims=[", format_millis_utc(self.timestamp))?;
        for i in 0..self.dims.len() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write_list(f, self.dim_values(i))?;
        }
        f.write_str("], metrics=")?;
        write_list(f, self.metrics.iter())?;
        f.write_str(", comprisedRows={")?;
        for (i, (index_num, rows)) in self.comprised_rows.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}=", index_num)?;
            write_list(f, rows.iter())?;
        }
        f.write_str("}}")
    }
}
