pub mod aggregator;
pub mod dimension_dictionary;
pub mod fact_table;
pub mod incremental_index;
pub mod index_schema;
pub mod input_row;
pub mod time_and_dims;

#[cfg(test)]
mod incremental_index_test;
#[cfg(test)]
mod time_and_dims_test;
