use std::path::PathBuf;

use thiserror::Error;

use crate::annotation::domain::annotation_error::AnnotationError;

#[derive(Error, Debug)]
pub enum TextGridError {
    #[error("malformed TextGrid at line {line}: {message}")]
    Format { line: usize, message: String },
    #[error("invalid annotation at line {line}: {source}")]
    Annotation {
        line: usize,
        #[source]
        source: AnnotationError,
    },
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
