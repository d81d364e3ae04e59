use std::fmt;
use std::sync::Arc;

/// An interned dimension value. Clones share the dictionary's allocation.
pub type DimValue = Arc<str>;

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Long,
    Double,
    String,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Long => "LONG",
            ValueType::Double => "DOUBLE",
            ValueType::String => "STRING",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An aggregated (or raw, under no-rollup) metric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Long(i64),
    Double(f64),
}

impl MetricValue {
    pub fn as_i64(&self) -> i64 {
        match self {
            MetricValue::Long(v) => *v,
            MetricValue::Double(v) => *v as i64,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            MetricValue::Long(v) => *v as f64,
            MetricValue::Double(v) => *v,
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            MetricValue::Long(_) => ValueType::Long,
            MetricValue::Double(_) => ValueType::Double,
        }
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        MetricValue::Long(v)
    }
}

impl From<i32> for MetricValue {
    fn from(v: i32) -> Self {
        MetricValue::Long(v as i64)
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Double(v)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Long(v) => write!(f, "{}", v),
            // Debug keeps the fractional part for whole numbers (1.0, not 1).
            MetricValue::Double(v) => write!(f, "{:?}", v),
        }
    }
}

/// What a segment writer needs to know about a column before writing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnCapabilities {
    pub value_type: ValueType,
    pub dictionary_encoded: bool,
    pub has_bitmap_indexes: bool,
    pub has_multiple_values: bool,
}

impl ColumnCapabilities {
    pub fn dimension(has_multiple_values: bool) -> Self {
        Self {
            value_type: ValueType::String,
            dictionary_encoded: true,
            has_bitmap_indexes: true,
            has_multiple_values,
        }
    }

    pub fn metric(value_type: ValueType) -> Self {
        Self {
            value_type,
            dictionary_encoded: false,
            has_bitmap_indexes: false,
            has_multiple_values: false,
        }
    }
}
