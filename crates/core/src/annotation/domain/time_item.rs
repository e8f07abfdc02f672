use std::cmp::Ordering;
use std::fmt::{Debug, Display};

use super::annotation_error::AnnotationError;

/// Shared view over the two temporal primitives, so tiers of either kind
/// can be searched with the same binary-search primitive.
pub trait TimeItem: Clone + Debug + Display + PartialEq {
    fn start(&self) -> f64;
    fn end(&self) -> f64;
    fn label(&self) -> &str;

    /// Three-way comparison of this item against a scalar instant.
    fn compare_instant(&self, time: f64) -> Ordering;
}

/// Combines two comparisons as `sign(a + b)`, mapping `Less`/`Equal`/`Greater`
/// to -1/0/1. Used for item-vs-span comparisons, where an instant strictly
/// inside a span cancels out to `Equal`.
pub(crate) fn sign_sum(a: Ordering, b: Ordering) -> Ordering {
    (a as i8 + b as i8).cmp(&0)
}

/// Validates declared bounds: both finite, `min_time <= max_time`.
pub(crate) fn check_span(min_time: f64, max_time: f64) -> Result<(), AnnotationError> {
    if !(min_time.is_finite() && max_time.is_finite()) {
        return Err(AnnotationError::NonFinite(format!("[{min_time}, {max_time}]")));
    }
    if min_time > max_time {
        return Err(AnnotationError::Construction { min_time, max_time });
    }
    Ok(())
}
