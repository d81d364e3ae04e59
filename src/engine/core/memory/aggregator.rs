use crate::engine::core::memory::input_row::InputRow;
use crate::engine::types::{MetricValue, ValueType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorKind {
    Count,
    LongSum,
    DoubleSum,
    LongMin,
    LongMax,
    DoubleMin,
    DoubleMax,
}

/// A named metric column and how rows rolled into it are combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorSpec {
    name: String,
    field: Option<String>,
    kind: AggregatorKind,
}

impl AggregatorSpec {
    pub fn count(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: None,
            kind: AggregatorKind::Count,
        }
    }

    pub fn new(name: impl Into<String>, field: impl Into<String>, kind: AggregatorKind) -> Self {
        if kind == AggregatorKind::Count {
            return Self::count(name);
        }
        Self {
            name: name.into(),
            field: Some(field.into()),
            kind,
        }
    }

    pub fn long_sum(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::new(name, field, AggregatorKind::LongSum)
    }

    pub fn double_sum(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::new(name, field, AggregatorKind::DoubleSum)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn kind(&self) -> AggregatorKind {
        self.kind
    }

    pub fn value_type(&self) -> ValueType {
        match self.kind {
            AggregatorKind::Count
            | AggregatorKind::LongSum
            | AggregatorKind::LongMin
            | AggregatorKind::LongMax => ValueType::Long,
            AggregatorKind::DoubleSum | AggregatorKind::DoubleMin | AggregatorKind::DoubleMax => {
                ValueType::Double
            }
        }
    }

    /// Identity state, before any row is folded in.
    pub fn init(&self) -> MetricValue {
        match self.kind {
            AggregatorKind::Count | AggregatorKind::LongSum => MetricValue::Long(0),
            AggregatorKind::LongMin => MetricValue::Long(i64::MAX),
            AggregatorKind::LongMax => MetricValue::Long(i64::MIN),
            AggregatorKind::DoubleSum => MetricValue::Double(0.0),
            AggregatorKind::DoubleMin => MetricValue::Double(f64::INFINITY),
            AggregatorKind::DoubleMax => MetricValue::Double(f64::NEG_INFINITY),
        }
    }

    /// Folds one input row into `state`. A row missing the input field leaves sums,
    /// minimums and maximums unchanged.
    pub fn aggregate(&self, state: &mut MetricValue, row: &InputRow) {
        if self.kind == AggregatorKind::Count {
            *state = MetricValue::Long(state.as_i64() + 1);
            return;
        }
        let Some(input) = self.field.as_deref().and_then(|f| row.metric(f)) else {
            return;
        };
        *state = self.combine(state, &input);
    }

    /// Merges two partial states, as when two rolled-up rows meet during a merge.
    pub fn combine(&self, a: &MetricValue, b: &MetricValue) -> MetricValue {
        match self.kind {
            AggregatorKind::Count | AggregatorKind::LongSum => {
                MetricValue::Long(a.as_i64().wrapping_add(b.as_i64()))
            }
            AggregatorKind::LongMin => MetricValue::Long(a.as_i64().min(b.as_i64())),
            AggregatorKind::LongMax => MetricValue::Long(a.as_i64().max(b.as_i64())),
            AggregatorKind::DoubleSum => MetricValue::Double(a.as_f64() + b.as_f64()),
            AggregatorKind::DoubleMin => MetricValue::Double(a.as_f64().min(b.as_f64())),
            AggregatorKind::DoubleMax => MetricValue::Double(a.as_f64().max(b.as_f64())),
        }
    }
}
