pub mod incremental_index_factory;
pub mod input_row_factory;

pub use incremental_index_factory::IncrementalIndexFactory;
pub use input_row_factory::{DEFAULT_TIMESTAMP, InputRowFactory};

#[cfg(test)]
mod incremental_index_factory_test;
#[cfg(test)]
mod input_row_factory_test;
