use crate::engine::core::bitmap::{BitmapFactory, MutableBitmap};

/// Builds every value bitmap of one dimension in a single pass over the rows.
///
/// One accumulator per dictionary code; rows are fed in row-number order and the
/// accumulators are frozen together at the end.
pub struct BitmapIndexBuilder<'f, F: BitmapFactory> {
    factory: &'f F,
    accumulators: Vec<F::Mutable>,
}

impl<'f, F: BitmapFactory> BitmapIndexBuilder<'f, F> {
    pub fn new(factory: &'f F, cardinality: usize) -> Self {
        Self {
            factory,
            accumulators: (0..cardinality).map(|_| factory.make_empty_mutable()).collect(),
        }
    }

    pub fn cardinality(&self) -> usize {
        self.accumulators.len()
    }

    /// Records that `row_num` holds the value with `code`. Codes past the cardinality
    /// are ignored.
    pub fn add(&mut self, row_num: u32, code: u32) {
        if let Some(acc) = self.accumulators.get_mut(code as usize) {
            acc.add(row_num);
        }
    }

    pub fn add_row(&mut self, row_num: u32, codes: &[u32]) {
        for code in codes {
            self.add(row_num, *code);
        }
    }

    /// Frozen bitmaps indexed by code.
    pub fn build(self) -> Vec<F::Immutable> {
        let factory = self.factory;
        self.accumulators
            .into_iter()
            .map(|acc| factory.make_immutable(acc))
            .collect()
    }
}
