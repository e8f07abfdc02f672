use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnotationError {
    #[error("interval start {min_time} is after its end {max_time}")]
    Construction { min_time: f64, max_time: f64 },
    #[error("{candidate} conflicts with existing {existing}")]
    Ordering { candidate: String, existing: String },
    #[error("{item} lies outside bounds [{min_time}, {max_time}]")]
    Bounds {
        item: String,
        min_time: f64,
        max_time: f64,
    },
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0} has a non-finite time")]
    NonFinite(String),
}
