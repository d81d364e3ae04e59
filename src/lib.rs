//! Conversion of an in-memory, append-only row index into the sorted, dictionary-encoded,
//! bitmap-indexed row view consumed by segment writers.

pub mod engine;
pub mod logging;
pub mod shared;

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod test_helpers;
