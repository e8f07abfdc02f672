use std::cmp::Ordering;
use std::fmt;

use super::interval::Interval;
use super::time_item::{sign_sum, TimeItem};

/// An instant with a label, as stored in a point tier.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    pub time: f64,
    pub label: String,
}

impl Mark {
    pub fn new(time: f64, label: impl Into<String>) -> Self {
        Self {
            time,
            label: label.into(),
        }
    }

    /// Orders by time only: marks at the same instant compare equal
    /// whatever their labels.
    pub fn compare(&self, other: &Mark) -> Ordering {
        self.time.total_cmp(&other.time)
    }

    /// `Equal` iff this mark lies strictly inside `interval`; otherwise the
    /// side of the interval the mark falls on.
    pub fn compare_interval(&self, interval: &Interval) -> Ordering {
        sign_sum(
            self.time.total_cmp(&interval.min_time),
            self.time.total_cmp(&interval.max_time),
        )
    }
}

impl TimeItem for Mark {
    fn start(&self) -> f64 {
        self.time
    }

    fn end(&self) -> f64 {
        self.time
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn compare_instant(&self, time: f64) -> Ordering {
        self.time.total_cmp(&time)
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mark({}, {:?})", self.time, self.label)
    }
}
