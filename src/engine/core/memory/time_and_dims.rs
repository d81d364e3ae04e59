use crate::engine::types::DimValue;

/// Fact table key: truncated timestamp plus the encoded values of every dimension.
///
/// `dims[i]` holds the interned values of dimension `i` (empty when null). Trailing null
/// dimensions are trimmed, so a row ingested before a dimension was discovered compares
/// equal to a later row where that dimension is null.
///
/// Ordering is timestamp, then dims lexicographically by value, then `row_index`.
/// `row_index` is only set for no-rollup indexes, where it keeps every insertion
/// distinct and breaks ties by insertion order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeAndDims {
    timestamp: i64,
    dims: Vec<Vec<DimValue>>,
    row_index: Option<u32>,
}

impl TimeAndDims {
    pub fn new(timestamp: i64, mut dims: Vec<Vec<DimValue>>, row_index: Option<u32>) -> Self {
        while dims.last().is_some_and(|d| d.is_empty()) {
            dims.pop();
        }
        Self {
            timestamp,
            dims,
            row_index,
        }
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn dims(&self) -> &[Vec<DimValue>] {
        &self.dims
    }

    /// Values of dimension `index`; empty when null or past the trimmed tail.
    pub fn dim(&self, index: usize) -> &[DimValue] {
        self.dims.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn row_index(&self) -> Option<u32> {
        self.row_index
    }
}
