use once_cell::sync::OnceCell;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, btree_map};
use std::iter::{Enumerate, FusedIterator};
use tracing::debug;

use crate::engine::core::adapter::bitmap_index_builder::BitmapIndexBuilder;
use crate::engine::core::adapter::dim_value_lookup::{DimValueLookup, EMPTY_LOOKUP};
use crate::engine::core::adapter::index_adapter::IndexableAdapter;
use crate::engine::core::adapter::rowboat::Rowboat;
use crate::engine::core::bitmap::{BitmapFactory, RoaringBitmapFactory};
use crate::engine::core::memory::aggregator::AggregatorSpec;
use crate::engine::core::memory::fact_table::FactRow;
use crate::engine::core::memory::incremental_index::IncrementalIndex;
use crate::engine::core::memory::time_and_dims::TimeAndDims;
use crate::engine::core::time::Interval;
use crate::engine::errors::IndexError;
use crate::engine::types::{ColumnCapabilities, DimValue};

/// Index number recorded in `comprised_rows` for rows coming straight from the index.
pub const INCREMENTAL_INDEX_NUM: u32 = 0;

/// Sorted, numbered, bitmap-indexed view over an [`IncrementalIndex`].
///
/// The index is borrowed immutably for the adapter lifetime, so it cannot be mutated
/// while rows or bitmaps derived from it are in use. Row numbers are positions in the
/// fact table's key order, and every traversal and every bitmap uses that same
/// numbering.
///
/// Sorted dictionaries are built once, on first use, from the values actually present
/// in the fact table. Bitmaps are built per dimension on first request, in one pass over
/// the rows, and cached.
pub struct IncrementalIndexAdapter<'a, F: BitmapFactory = RoaringBitmapFactory> {
    interval: Interval,
    index: &'a IncrementalIndex,
    factory: F,
    lookups: OnceCell<Vec<DimValueLookup>>,
    bitmaps: Vec<OnceCell<Vec<F::Immutable>>>,
}

impl<'a, F: BitmapFactory> IncrementalIndexAdapter<'a, F> {
    /// Fails when the index holds data outside `interval`.
    pub fn new(
        interval: Interval,
        index: &'a IncrementalIndex,
        factory: F,
    ) -> Result<Self, IndexError> {
        let data = index.interval();
        if !interval.contains(&data) {
            return Err(IndexError::IntervalMismatch {
                requested: interval.to_string(),
                data: data.to_string(),
            });
        }

        let dimension_count = index.dimensions().len();
        debug!(
            target: "rollup_index::adapter",
            interval = %interval,
            rows = index.row_count(),
            dimensions = dimension_count,
            rollup = index.is_rollup(),
            "Created incremental index adapter"
        );

        Ok(Self {
            interval,
            index,
            factory,
            lookups: OnceCell::new(),
            bitmaps: (0..dimension_count).map(|_| OnceCell::new()).collect(),
        })
    }

    pub fn index(&self) -> &'a IncrementalIndex {
        self.index
    }

    fn dimension_position(&self, dimension: &str) -> Option<usize> {
        self.index.dimension(dimension).map(|d| d.index())
    }

    /// Sorted lookups for every dimension, in dimension order.
    pub fn lookups(&self) -> &[DimValueLookup] {
        self.lookups.get_or_init(|| {
            let mut sets: Vec<BTreeSet<DimValue>> =
                vec![BTreeSet::new(); self.index.dimensions().len()];
            for key in self.index.facts().keys() {
                for (set, values) in sets.iter_mut().zip(key.dims()) {
                    set.extend(values.iter().cloned());
                }
            }
            let lookups: Vec<DimValueLookup> =
                sets.into_iter().map(DimValueLookup::from_sorted_set).collect();
            debug!(
                target: "rollup_index::adapter",
                cardinalities = ?lookups.iter().map(DimValueLookup::size).collect::<Vec<_>>(),
                "Built sorted dimension dictionaries"
            );
            lookups
        })
    }

    /// Fact entries paired with their row numbers. Rows and bitmaps both number rows
    /// through this. The schema caps the fact count at `u32::MAX`, so numbers fit `u32`.
    fn numbered_facts(&self) -> Enumerate<btree_map::Iter<'a, TimeAndDims, FactRow>> {
        self.index.facts().iter().enumerate()
    }

    fn build_bitmaps(&self, position: usize) -> Vec<F::Immutable> {
        let lookup = &self.lookups()[position];
        let mut builder = BitmapIndexBuilder::new(&self.factory, lookup.size());
        for (row_num, (key, _)) in self.numbered_facts() {
            builder.add_row(row_num as u32, &lookup.encode(key.dim(position)));
        }
        debug!(
            target: "rollup_index::adapter",
            dimension = self.index.dimensions()[position].name(),
            values = builder.cardinality(),
            rows = self.row_count(),
            "Built bitmap index"
        );
        builder.build()
    }

    /// Union of every value bitmap of `dimension`: the rows where it is not null.
    pub fn non_null_rows(&self, dimension: &str) -> F::Immutable {
        match self.dimension_position(dimension) {
            Some(position) => {
                let bitmaps = self.bitmaps[position].get_or_init(|| self.build_bitmaps(position));
                self.factory.union(bitmaps.iter())
            }
            None => self.factory.make_empty_immutable(),
        }
    }
}

impl<'a, F: BitmapFactory> IndexableAdapter for IncrementalIndexAdapter<'a, F> {
    type Bitmap = F::Immutable;
    type Rows<'r>
        = Rows<'r>
    where
        Self: 'r;

    fn data_interval(&self) -> Interval {
        self.interval
    }

    fn row_count(&self) -> usize {
        self.index.row_count()
    }

    fn dimension_names(&self) -> Vec<&str> {
        self.index.dimension_names().collect()
    }

    fn aggregators(&self) -> &[AggregatorSpec] {
        self.index.metric_specs()
    }

    fn capabilities(&self, column: &str) -> Option<ColumnCapabilities> {
        self.index.capabilities(column)
    }

    fn dimension_values(&self, dimension: &str) -> &DimValueLookup {
        match self.dimension_position(dimension) {
            Some(position) => &self.lookups()[position],
            None => &EMPTY_LOOKUP,
        }
    }

    fn rows(&self) -> Rows<'_> {
        Rows {
            facts: self.numbered_facts(),
            lookups: self.lookups(),
            rollup: self.index.is_rollup(),
        }
    }

    fn bitmap_values(&self, dimension: &str, code: u32) -> F::Immutable {
        let Some(position) = self.dimension_position(dimension) else {
            return self.factory.make_empty_immutable();
        };
        let bitmaps = self.bitmaps[position].get_or_init(|| self.build_bitmaps(position));
        match bitmaps.get(code as usize) {
            Some(bitmap) => bitmap.clone(),
            None => self.factory.make_empty_immutable(),
        }
    }
}

/// One traversal of an adapter's rows. Each call to `rows()` returns a new one.
#[derive(Clone)]
pub struct Rows<'r> {
    facts: Enumerate<btree_map::Iter<'r, TimeAndDims, FactRow>>,
    lookups: &'r [DimValueLookup],
    rollup: bool,
}

impl<'r> Iterator for Rows<'r> {
    type Item = Rowboat<'r>;

    fn next(&mut self) -> Option<Rowboat<'r>> {
        let (row_num, (key, fact)) = self.facts.next()?;
        let dims = self
            .lookups
            .iter()
            .enumerate()
            .map(|(i, lookup)| lookup.encode(key.dim(i)))
            .collect();
        let comprised_rows = if self.rollup {
            BTreeMap::from([(INCREMENTAL_INDEX_NUM, fact.comprised.clone())])
        } else {
            BTreeMap::new()
        };
        Some(Rowboat::new(
            row_num as u32,
            key.timestamp(),
            dims,
            Cow::Borrowed(fact.metrics.as_slice()),
            comprised_rows,
            self.lookups,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.facts.size_hint()
    }
}

impl ExactSizeIterator for Rows<'_> {}

impl FusedIterator for Rows<'_> {}
