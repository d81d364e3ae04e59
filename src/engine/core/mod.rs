pub mod adapter;
pub mod bitmap;
pub mod memory;
pub mod time;

pub use adapter::{
    DimValueLookup, IncrementalIndexAdapter, IndexableAdapter, MergedRows, Rowboat, RowboatMerger,
};
pub use bitmap::{
    BitmapFactory, ImmutableBitmap, ImmutableRoaringBitmap, MutableBitmap, RoaringBitmapFactory,
};
pub use memory::aggregator::{AggregatorKind, AggregatorSpec};
pub use memory::dimension_dictionary::DimensionDictionary;
pub use memory::fact_table::{FactRow, FactTable};
pub use memory::incremental_index::{DimensionDesc, IncrementalIndex};
pub use memory::index_schema::{IndexSchema, IndexSchemaBuilder, MultiValueHandling};
pub use memory::input_row::InputRow;
pub use memory::time_and_dims::TimeAndDims;
pub use time::Interval;
