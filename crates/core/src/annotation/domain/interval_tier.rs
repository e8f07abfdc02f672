use super::annotation_error::AnnotationError;
use super::interval::Interval;
use super::time_item::check_span;

/// A time-ordered track of non-overlapping intervals.
///
/// Intervals are kept sorted by `(min_time, max_time)`. With no overlaps
/// allowed this keeps both endpoints non-decreasing, so checking the two
/// neighbours of the insertion point is enough to reject a conflict.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IntervalTier {
    name: Option<String>,
    min_time: Option<f64>,
    max_time: Option<f64>,
    intervals: Vec<Interval>,
}

impl IntervalTier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// A tier with declared bounds; every inserted interval must lie in
    /// `[min_time, max_time]`.
    pub fn bounded(
        name: Option<String>,
        min_time: f64,
        max_time: f64,
    ) -> Result<Self, AnnotationError> {
        check_span(min_time, max_time)?;
        Ok(Self {
            name,
            min_time: Some(min_time),
            max_time: Some(max_time),
            intervals: Vec::new(),
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn declared_bounds(&self) -> (Option<f64>, Option<f64>) {
        (self.min_time, self.max_time)
    }

    pub fn add(
        &mut self,
        min_time: f64,
        max_time: f64,
        label: impl Into<String>,
    ) -> Result<(), AnnotationError> {
        self.insert(Interval::new(min_time, max_time, label)?)
    }

    /// Inserts at the sorted position. On any conflict the tier is left
    /// untouched.
    pub fn insert(&mut self, interval: Interval) -> Result<(), AnnotationError> {
        self.check_bounds(&interval)?;

        let key = interval.bounds();
        let index = self
            .intervals
            .partition_point(|existing| lexically_before(existing.bounds(), key));

        let next = self.intervals.get(index);
        let prev = index.checked_sub(1).map(|i| &self.intervals[i]);
        for neighbour in [prev, next].into_iter().flatten() {
            if neighbour.overlaps(&interval) || neighbour.bounds() == key {
                return Err(AnnotationError::Ordering {
                    candidate: interval.to_string(),
                    existing: neighbour.to_string(),
                });
            }
        }

        self.intervals.insert(index, interval);
        Ok(())
    }

    /// Removes the first interval equal to `interval` (same span and label).
    pub fn remove(&mut self, interval: &Interval) -> Result<Interval, AnnotationError> {
        let index = self
            .intervals
            .iter()
            .position(|existing| existing == interval)
            .ok_or_else(|| AnnotationError::NotFound(interval.to_string()))?;
        Ok(self.intervals.remove(index))
    }

    pub fn remove_span(
        &mut self,
        min_time: f64,
        max_time: f64,
        label: &str,
    ) -> Result<Interval, AnnotationError> {
        self.remove(&Interval::new(min_time, max_time, label)?)
    }

    /// The interval with `time` strictly inside it. A time on a boundary
    /// (or outside the tier) has no containing interval.
    pub fn containing(&self, time: f64) -> Option<&Interval> {
        let index = self.intervals.partition_point(|iv| iv.max_time <= time);
        self.intervals
            .get(index)
            .filter(|iv| iv.min_time < time && time < iv.max_time)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn get(&self, index: usize) -> Option<&Interval> {
        self.intervals.get(index)
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Declared bounds, falling back to the first start / last end.
    pub fn bounds(&self) -> (f64, f64) {
        let min = self
            .min_time
            .or_else(|| self.intervals.first().map(|iv| iv.min_time))
            .unwrap_or(0.0);
        let max = self
            .max_time
            .or_else(|| self.intervals.last().map(|iv| iv.max_time))
            .unwrap_or(min);
        (min, max)
    }

    /// Contiguous coverage of [`bounds`](Self::bounds): every gap before,
    /// between and after the stored intervals becomes an interval labelled
    /// `null_label`.
    pub fn fill_gaps(&self, null_label: &str) -> Vec<Interval> {
        let (min, max) = self.bounds();
        let mut filled = Vec::with_capacity(self.intervals.len() * 2 + 1);
        let mut cursor = min;

        for interval in &self.intervals {
            if interval.min_time > cursor {
                filled.push(gap(cursor, interval.min_time, null_label));
            }
            filled.push(interval.clone());
            cursor = cursor.max(interval.max_time);
        }
        if max > cursor {
            filled.push(gap(cursor, max, null_label));
        }
        filled
    }

    fn check_bounds(&self, interval: &Interval) -> Result<(), AnnotationError> {
        if !(interval.min_time.is_finite() && interval.max_time.is_finite()) {
            return Err(AnnotationError::NonFinite(interval.to_string()));
        }
        let lower = self.min_time.unwrap_or(0.0);
        let below = interval.min_time < lower;
        let above = self.max_time.is_some_and(|upper| interval.max_time > upper);
        if below || above {
            return Err(AnnotationError::Bounds {
                item: interval.to_string(),
                min_time: lower,
                max_time: self.max_time.unwrap_or(f64::INFINITY),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a IntervalTier {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

fn lexically_before(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 < b.0 || (a.0 == b.0 && a.1 < b.1)
}

fn gap(min_time: f64, max_time: f64, label: &str) -> Interval {
    Interval {
        min_time,
        max_time,
        label: label.to_string(),
    }
}
