use crate::engine::core::adapter::dim_value_lookup::DimValueLookup;
use crate::engine::core::adapter::rowboat::Rowboat;
use crate::engine::core::bitmap::ImmutableBitmap;
use crate::engine::core::memory::aggregator::AggregatorSpec;
use crate::engine::core::time::Interval;
use crate::engine::types::{ColumnCapabilities, ValueType};

/// Read-only, sorted and indexed view over a row set, as consumed by segment writers.
pub trait IndexableAdapter {
    type Bitmap: ImmutableBitmap;
    type Rows<'r>: Iterator<Item = Rowboat<'r>>
    where
        Self: 'r;

    fn data_interval(&self) -> Interval;

    /// Number of rows `rows()` yields. Constant for the adapter lifetime.
    fn row_count(&self) -> usize;

    fn dimension_names(&self) -> Vec<&str>;

    fn aggregators(&self) -> &[AggregatorSpec];

    fn metric_names(&self) -> Vec<&str> {
        self.aggregators().iter().map(AggregatorSpec::name).collect()
    }

    fn metric_type(&self, metric: &str) -> Option<ValueType> {
        self.aggregators()
            .iter()
            .find(|a| a.name() == metric)
            .map(AggregatorSpec::value_type)
    }

    fn capabilities(&self, column: &str) -> Option<ColumnCapabilities>;

    /// Sorted distinct values of `dimension`; empty for unknown dimensions.
    fn dimension_values(&self, dimension: &str) -> &DimValueLookup;

    /// A fresh traversal starting at row 0. Traversals are independent of each other.
    fn rows(&self) -> Self::Rows<'_>;

    /// Rows whose `dimension` holds the value with `code`; empty for unknown dimensions
    /// and codes.
    fn bitmap_values(&self, dimension: &str, code: u32) -> Self::Bitmap;
}
