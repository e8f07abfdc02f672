use std::cmp::Ordering;
use std::fmt;

use super::annotation_error::AnnotationError;
use super::mark::Mark;
use super::time_item::{sign_sum, TimeItem};

/// A labelled span of time, `min_time <= max_time`.
#[derive(Clone, Debug, PartialEq)]
pub struct Interval {
    pub min_time: f64,
    pub max_time: f64,
    pub label: String,
}

impl Interval {
    /// Fails with [`AnnotationError::Construction`] when `min_time > max_time`
    /// (or either bound is NaN).
    pub fn new(min_time: f64, max_time: f64, label: impl Into<String>) -> Result<Self, AnnotationError> {
        if !(min_time <= max_time) {
            return Err(AnnotationError::Construction { min_time, max_time });
        }
        Ok(Self {
            min_time,
            max_time,
            label: label.into(),
        })
    }

    pub fn duration(&self) -> f64 {
        self.max_time - self.min_time
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min_time, self.max_time)
    }

    /// Symmetric and strict: intervals that merely touch do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        other.min_time < self.max_time && self.min_time < other.max_time
    }

    /// Inclusive on both ends.
    pub fn contains_time(&self, time: f64) -> bool {
        self.min_time <= time && time <= self.max_time
    }

    pub fn contains_mark(&self, mark: &Mark) -> bool {
        self.contains_time(mark.time)
    }

    pub fn contains_interval(&self, other: &Interval) -> bool {
        other.min_time >= self.min_time && other.max_time <= self.max_time
    }

    /// Orders non-overlapping intervals by start time.
    pub fn compare(&self, other: &Interval) -> Ordering {
        self.min_time.total_cmp(&other.min_time)
    }

    pub fn compare_mark(&self, mark: &Mark) -> Ordering {
        mark.compare_interval(self).reverse()
    }
}

impl TimeItem for Interval {
    fn start(&self) -> f64 {
        self.min_time
    }

    fn end(&self) -> f64 {
        self.max_time
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn compare_instant(&self, time: f64) -> Ordering {
        sign_sum(self.min_time.total_cmp(&time), self.max_time.total_cmp(&time))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Interval({}, {}, {:?})",
            self.min_time, self.max_time, self.label
        )
    }
}
