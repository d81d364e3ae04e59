use std::borrow::Cow;
use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};
use std::iter::FusedIterator;
use tracing::{debug, info};

use crate::engine::core::adapter::dim_value_lookup::{DimValueLookup, EMPTY_LOOKUP};
use crate::engine::core::adapter::index_adapter::IndexableAdapter;
use crate::engine::core::adapter::rowboat::Rowboat;
use crate::engine::core::memory::aggregator::AggregatorSpec;
use crate::engine::core::time::Interval;
use crate::engine::errors::MergeError;
use crate::engine::types::{DimValue, MetricValue};

/// How one adapter's dimensions and codes land in the merged row space.
#[derive(Debug, Clone)]
struct SourceRemap {
    /// `dims[i] = (merged position, source code -> merged code)` for source dimension `i`.
    dims: Vec<(usize, Vec<u32>)>,
}

/// Merges the rows of several adapters into one sorted, renumbered sequence.
///
/// Dimensions are the union of every adapter's dimensions in first-seen order, and each
/// merged dimension gets a sorted dictionary over the union of its values. With rollup,
/// rows sharing timestamp and dimension values are combined into one.
pub struct RowboatMerger<'a, A: IndexableAdapter> {
    adapters: Vec<&'a A>,
    rollup: bool,
    dimension_names: Vec<String>,
    lookups: Vec<DimValueLookup>,
    remaps: Vec<SourceRemap>,
    aggregators: Vec<AggregatorSpec>,
    interval: Interval,
}

impl<'a, A: IndexableAdapter> RowboatMerger<'a, A> {
    pub fn new(adapters: Vec<&'a A>, rollup: bool) -> Result<Self, MergeError> {
        let Some(first) = adapters.first() else {
            return Err(MergeError::NoAdapters);
        };

        let expected: Vec<String> = first.metric_names().into_iter().map(String::from).collect();
        for (index, adapter) in adapters.iter().enumerate().skip(1) {
            let found = adapter.metric_names();
            if found != expected {
                return Err(MergeError::MetricMismatch {
                    index,
                    expected,
                    found: found.into_iter().map(String::from).collect(),
                });
            }
        }
        let aggregators = first.aggregators().to_vec();

        let mut dimension_names: Vec<String> = Vec::new();
        let mut value_sets: Vec<BTreeSet<DimValue>> = Vec::new();
        for adapter in &adapters {
            for name in adapter.dimension_names() {
                let position = match dimension_names.iter().position(|d| d == name) {
                    Some(position) => position,
                    None => {
                        dimension_names.push(name.to_string());
                        value_sets.push(BTreeSet::new());
                        dimension_names.len() - 1
                    }
                };
                value_sets[position].extend(adapter.dimension_values(name).values().iter().cloned());
            }
        }
        let lookups: Vec<DimValueLookup> = value_sets
            .into_iter()
            .map(DimValueLookup::from_sorted_set)
            .collect();

        let remaps = adapters
            .iter()
            .map(|adapter| SourceRemap {
                dims: adapter
                    .dimension_names()
                    .into_iter()
                    .filter_map(|name| {
                        let position = dimension_names.iter().position(|d| d == name)?;
                        let codes = code_map(adapter.dimension_values(name), &lookups[position]);
                        Some((position, codes))
                    })
                    .collect(),
            })
            .collect();

        let interval = adapters
            .iter()
            .map(|adapter| adapter.data_interval())
            .filter(|interval| !interval.is_empty())
            .reduce(|a, b| a.span(&b))
            .unwrap_or_else(|| first.data_interval());

        info!(
            target: "rollup_index::merger",
            adapters = adapters.len(),
            dimensions = dimension_names.len(),
            rollup,
            interval = %interval,
            "Prepared rowboat merge"
        );

        Ok(Self {
            adapters,
            rollup,
            dimension_names,
            lookups,
            remaps,
            aggregators,
            interval,
        })
    }

    pub fn data_interval(&self) -> Interval {
        self.interval
    }

    pub fn is_rollup(&self) -> bool {
        self.rollup
    }

    pub fn dimension_names(&self) -> Vec<&str> {
        self.dimension_names.iter().map(String::as_str).collect()
    }

    pub fn aggregators(&self) -> &[AggregatorSpec] {
        &self.aggregators
    }

    pub fn metric_names(&self) -> Vec<&str> {
        self.aggregators.iter().map(AggregatorSpec::name).collect()
    }

    pub fn lookups(&self) -> &[DimValueLookup] {
        &self.lookups
    }

    /// Sorted union of `dimension` values across all adapters; empty for unknown names.
    pub fn dimension_values(&self, dimension: &str) -> &DimValueLookup {
        self.dimension_names
            .iter()
            .position(|d| d == dimension)
            .map_or(&EMPTY_LOOKUP, |position| &self.lookups[position])
    }

    /// A fresh merged traversal. Each call restarts every source adapter.
    pub fn rows(&self) -> MergedRows<'_, 'a, A> {
        let mut rows = MergedRows {
            sources: self.adapters.iter().map(|&adapter| adapter.rows()).collect(),
            heap: BinaryHeap::with_capacity(self.adapters.len()),
            lookups: &self.lookups,
            remaps: &self.remaps,
            aggregators: &self.aggregators,
            dimension_count: self.dimension_names.len(),
            rollup: self.rollup,
            next_row_num: 0,
        };
        for source in 0..rows.sources.len() {
            rows.advance(source);
        }
        rows
    }
}

/// Source codes are sorted by value and `merged` holds a superset of them, so one
/// forward walk over `merged` maps every code.
fn code_map(source: &DimValueLookup, merged: &DimValueLookup) -> Vec<u32> {
    let mut codes = Vec::with_capacity(source.size());
    let mut merged_values = merged.iter();
    for value in source.values() {
        for (code, candidate) in merged_values.by_ref() {
            if candidate == &**value {
                codes.push(code);
                break;
            }
        }
    }
    codes
}

/// Next pending row of one source, already expressed in merged codes.
struct HeapEntry {
    timestamp: i64,
    dims: Vec<Vec<u32>>,
    source: usize,
    row_num: u32,
    metrics: Vec<MetricValue>,
}

impl HeapEntry {
    fn same_key(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp && self.dims == other.dims
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.dims.cmp(&other.dims))
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.row_num.cmp(&other.row_num))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

/// One traversal of a [`RowboatMerger`].
pub struct MergedRows<'m, 'a, A>
where
    A: IndexableAdapter + 'a,
{
    sources: Vec<A::Rows<'a>>,
    heap: BinaryHeap<Reverse<HeapEntry>>,
    lookups: &'m [DimValueLookup],
    remaps: &'m [SourceRemap],
    aggregators: &'m [AggregatorSpec],
    dimension_count: usize,
    rollup: bool,
    next_row_num: u32,
}

impl<'m, 'a, A> MergedRows<'m, 'a, A>
where
    A: IndexableAdapter + 'a,
{
    /// Pulls the next row of `source` into the heap, if any.
    fn advance(&mut self, source: usize) {
        let Some(boat) = self.sources[source].next() else {
            return;
        };
        let mut dims = vec![Vec::new(); self.dimension_count];
        for (codes, (position, code_map)) in boat.dims().iter().zip(&self.remaps[source].dims) {
            dims[*position] = codes
                .iter()
                .filter_map(|code| code_map.get(*code as usize).copied())
                .collect();
        }
        self.heap.push(Reverse(HeapEntry {
            timestamp: boat.timestamp(),
            dims,
            source,
            row_num: boat.row_num(),
            metrics: boat.into_metrics(),
        }));
    }

    fn combine(&self, a: &[MetricValue], b: &[MetricValue]) -> Vec<MetricValue> {
        self.aggregators
            .iter()
            .zip(a.iter().zip(b))
            .map(|(spec, (x, y))| spec.combine(x, y))
            .collect()
    }
}

impl<'m, 'a, A> Iterator for MergedRows<'m, 'a, A>
where
    A: IndexableAdapter + 'a,
{
    type Item = Rowboat<'m>;

    fn next(&mut self) -> Option<Rowboat<'m>> {
        let Reverse(mut head) = self.heap.pop()?;
        self.advance(head.source);

        let mut comprised: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        comprised
            .entry(head.source as u32)
            .or_default()
            .push(head.row_num);
        let mut metrics = std::mem::take(&mut head.metrics);

        if self.rollup {
            while self
                .heap
                .peek()
                .is_some_and(|Reverse(next)| next.same_key(&head))
            {
                let Some(Reverse(next)) = self.heap.pop() else {
                    break;
                };
                self.advance(next.source);
                metrics = self.combine(&metrics, &next.metrics);
                comprised.entry(next.source as u32).or_default().push(next.row_num);
            }
        }

        let row_num = self.next_row_num;
        self.next_row_num += 1;
        if comprised.len() > 1 || comprised.values().any(|rows| rows.len() > 1) {
            debug!(
                target: "rollup_index::merger",
                row_num,
                sources = comprised.len(),
                "Combined rows"
            );
        }

        Some(Rowboat::new(
            row_num,
            head.timestamp,
            head.dims,
            Cow::Owned(metrics),
            comprised,
            self.lookups,
        ))
    }
}

impl<'m, 'a, A> FusedIterator for MergedRows<'m, 'a, A> where A: IndexableAdapter + 'a {}
