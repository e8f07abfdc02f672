use super::annotation_error::AnnotationError;
use super::mark::Mark;
use super::time_item::check_span;

/// A time-ordered track of marks, at most one per instant.
///
/// Praat calls these `TextTier`s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointTier {
    name: Option<String>,
    min_time: Option<f64>,
    max_time: Option<f64>,
    marks: Vec<Mark>,
}

impl PointTier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

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
            marks: Vec::new(),
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn declared_bounds(&self) -> (Option<f64>, Option<f64>) {
        (self.min_time, self.max_time)
    }

    pub fn add(&mut self, time: f64, label: impl Into<String>) -> Result<(), AnnotationError> {
        self.insert(Mark::new(time, label))
    }

    pub fn insert(&mut self, mark: Mark) -> Result<(), AnnotationError> {
        if !mark.time.is_finite() {
            return Err(AnnotationError::NonFinite(mark.to_string()));
        }
        let lower = self.min_time.unwrap_or(0.0);
        if mark.time < lower || self.max_time.is_some_and(|upper| mark.time > upper) {
            return Err(AnnotationError::Bounds {
                item: mark.to_string(),
                min_time: lower,
                max_time: self.max_time.unwrap_or(f64::INFINITY),
            });
        }

        let index = self.marks.partition_point(|existing| existing.time < mark.time);
        if let Some(existing) = self.marks.get(index).filter(|m| m.time == mark.time) {
            return Err(AnnotationError::Ordering {
                candidate: mark.to_string(),
                existing: existing.to_string(),
            });
        }

        self.marks.insert(index, mark);
        Ok(())
    }

    /// Removes the mark equal to `mark` (same time and label).
    pub fn remove(&mut self, mark: &Mark) -> Result<Mark, AnnotationError> {
        let index = self
            .marks
            .iter()
            .position(|existing| existing == mark)
            .ok_or_else(|| AnnotationError::NotFound(mark.to_string()))?;
        Ok(self.marks.remove(index))
    }

    pub fn remove_at(&mut self, time: f64, label: &str) -> Result<Mark, AnnotationError> {
        self.remove(&Mark::new(time, label))
    }

    /// The mark sitting exactly at `time`, if any.
    pub fn containing(&self, time: f64) -> Option<&Mark> {
        let index = self.marks.partition_point(|m| m.time < time);
        self.marks.get(index).filter(|m| m.time == time)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mark> {
        self.marks.iter()
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn get(&self, index: usize) -> Option<&Mark> {
        self.marks.get(index)
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn bounds(&self) -> (f64, f64) {
        let min = self
            .min_time
            .or_else(|| self.marks.first().map(|m| m.time))
            .unwrap_or(0.0);
        let max = self
            .max_time
            .or_else(|| self.marks.last().map(|m| m.time))
            .unwrap_or(min);
        (min, max)
    }
}

impl<'a> IntoIterator for &'a PointTier {
    type Item = &'a Mark;
    type IntoIter = std::slice::Iter<'a, Mark>;

    fn into_iter(self) -> Self::IntoIter {
        self.marks.iter()
    }
}
