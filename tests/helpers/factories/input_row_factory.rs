use crate::engine::core::InputRow;
use crate::engine::types::MetricValue;
use rand::Rng;

/// Timestamp used by factories unless overridden: 2018-08-04T01:47:54.588Z.
pub const DEFAULT_TIMESTAMP: i64 = 1533347274588;

/// Factory to build InputRow instances for testing
#[derive(Clone)]
pub struct InputRowFactory {
    timestamp: i64,
    dims: Vec<(String, Vec<String>)>,
    metrics: Vec<(String, MetricValue)>,
}

impl InputRowFactory {
    pub fn new() -> Self {
        Self {
            timestamp: DEFAULT_TIMESTAMP,
            dims: vec![],
            metrics: vec![],
        }
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_dim(mut self, name: &str, value: &str) -> Self {
        self.dims.push((name.to_string(), vec![value.to_string()]));
        self
    }

    pub fn with_multi_dim(mut self, name: &str, values: &[&str]) -> Self {
        self.dims.push((
            name.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        ));
        self
    }

    pub fn with_metric(mut self, name: &str, value: impl Into<MetricValue>) -> Self {
        self.metrics.push((name.to_string(), value.into()));
        self
    }

    pub fn create(self) -> InputRow {
        let mut row = InputRow::new(self.timestamp);
        for (name, values) in self.dims {
            row = row.with_multi_dim(name, values);
        }
        for (name, value) in self.metrics {
            row = row.with_metric(name, value);
        }
        row
    }

    /// `count` rows with `dim1` values `v0..v{count-1}` at random timestamps within one
    /// hour after the configured timestamp.
    pub fn create_list(self, count: usize) -> Vec<InputRow> {
        let mut rng = rand::thread_rng();
        (0..count)
            .map(|i| {
                let timestamp = rng.gen_range(self.timestamp..self.timestamp + 3_600_000);
                self.clone()
                    .with_timestamp(timestamp)
                    .with_dim("dim1", &format!("v{}", i))
                    .create()
            })
            .collect()
    }
}
