use std::fmt;

use crate::engine::errors::IndexError;
use crate::shared::time::format_millis_utc;

/// Half-open `[start, end)` span of epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: i64,
    end: i64,
}

impl Interval {
    /// Fails fast when `end < start`; an empty interval (`start == end`) is allowed.
    pub fn new(start: i64, end: i64) -> Result<Self, IndexError> {
        if end < start {
            return Err(IndexError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Interval between two bounds given in either order.
    pub fn covering(a: i64, b: i64) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// The interval covering every representable timestamp.
    pub fn eternity() -> Self {
        Self {
            start: i64::MIN,
            end: i64::MAX,
        }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains_millis(&self, ts: i64) -> bool {
        ts >= self.start && ts < self.end
    }

    /// True when `other` lies within `self`. An empty `other` is contained anywhere.
    pub fn contains(&self, other: &Interval) -> bool {
        other.is_empty() || (other.start >= self.start && other.end <= self.end)
    }

    /// Smallest interval covering both.
    pub fn span(&self, other: &Interval) -> Interval {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Interval {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}",
            format_millis_utc(self.start),
            format_millis_utc(self.end)
        )
    }
}
