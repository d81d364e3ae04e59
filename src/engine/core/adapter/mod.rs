pub mod bitmap_index_builder;
pub mod dim_value_lookup;
pub mod incremental_index_adapter;
pub mod index_adapter;
pub mod rowboat;
pub mod rowboat_merger;

pub use dim_value_lookup::DimValueLookup;
pub use incremental_index_adapter::IncrementalIndexAdapter;
pub use index_adapter::IndexableAdapter;
pub use rowboat::Rowboat;
pub use rowboat_merger::{MergedRows, RowboatMerger};
