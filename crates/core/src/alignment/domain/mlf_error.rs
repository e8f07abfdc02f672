use std::path::PathBuf;

use thiserror::Error;

use crate::annotation::domain::annotation_error::AnnotationError;

#[derive(Error, Debug)]
pub enum MlfError {
    #[error("malformed MLF at line {line}: {message}")]
    Format { line: usize, message: String },
    #[error("invalid alignment for {utterance} at line {line}: {source}")]
    Annotation {
        utterance: String,
        line: usize,
        #[source]
        source: AnnotationError,
    },
    #[error("invalid decoder configuration: {0}")]
    Config(String),
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
