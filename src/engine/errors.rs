use thiserror::Error;
use tracing::{debug, error, warn};

/// Errors raised while building an in-memory index or an adapter over it.
#[derive(Debug, Error, PartialEq)]
pub enum IndexError {
    #[error("Invalid interval: end {end} precedes start {start}")]
    InvalidInterval { start: i64, end: i64 },

    #[error("Index data interval {data} is not contained in adapter interval {requested}")]
    IntervalMismatch { requested: String, data: String },

    #[error("Index is full: max_rows={0}")]
    IndexFull(usize),

    #[error("Duplicate metric name: {0}")]
    DuplicateMetric(String),

    #[error("Duplicate dimension name: {0}")]
    DuplicateDimension(String),

    #[error("Column declared as both dimension and metric: {0}")]
    DimensionMetricConflict(String),

    #[error("Invalid granularity: {0}")]
    InvalidGranularity(String),

    #[error("Invalid multi-value handling: {0}")]
    InvalidMultiValueHandling(String),

    #[error("Timestamp {0} precedes the index minimum timestamp")]
    TimestampOutOfRange(i64),

    #[error("Row index space exhausted after {0} rows")]
    RowIndexOverflow(u32),
}

impl IndexError {
    pub fn log_error(&self) {
        match self {
            IndexError::InvalidInterval { start, end } => {
                error!("Invalid interval [{}, {})", start, end);
            }
            IndexError::IntervalMismatch { requested, data } => {
                error!("Adapter interval does not cover index data");
                debug!(requested = %requested, data = %data, "Interval mismatch details");
            }
            IndexError::IndexFull(max) => {
                warn!("Rejecting row: index is full");
                debug!(max_rows = max, "Index full details");
            }
            IndexError::DuplicateMetric(name)
            | IndexError::DuplicateDimension(name)
            | IndexError::DimensionMetricConflict(name) => {
                error!("Invalid index schema: {}", self);
                debug!(column = %name, "Schema error details: {:?}", self);
            }
            IndexError::InvalidGranularity(_) | IndexError::InvalidMultiValueHandling(_) => {
                error!("Invalid index configuration: {}", self);
            }
            IndexError::TimestampOutOfRange(ts) => {
                error!("Row rejected: {}", self);
                debug!(timestamp = ts, "Rejected row timestamp");
            }
            IndexError::RowIndexOverflow(count) => {
                error!("Row rejected: {}", self);
                debug!(ingested = count, "Row index overflow details");
            }
        }
    }
}

/// Errors raised when combining the rows of several adapters.
#[derive(Debug, Error, PartialEq)]
pub enum MergeError {
    #[error("No adapters to merge")]
    NoAdapters,

    #[error("Metric mismatch: adapter {index} has metrics {found:?}, expected {expected:?}")]
    MetricMismatch {
        index: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Index error: {0}")]
    Index(#[from] IndexError),
}
