use std::path::PathBuf;

use thiserror::Error;

use crate::alignment::domain::mlf_error::MlfError;
use crate::evaluation::domain::evaluation_error::EvaluationError;
use crate::textgrid::domain::textgrid_error::TextGridError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Decode(#[from] MlfError),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: TextGridError,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: TextGridError,
    },
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("two utterances map to the same output file {0}")]
    DuplicateOutput(PathBuf),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error("writer thread panicked")]
    WorkerPanicked,
}
