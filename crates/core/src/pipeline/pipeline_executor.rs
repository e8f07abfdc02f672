use std::path::PathBuf;

use crate::annotation::domain::grid::Grid;
use crate::textgrid::domain::grid_writer::GridWriter;

use super::pipeline_error::PipelineError;
use super::pipeline_logger::PipelineLogger;

/// One decoded grid and the file it goes to.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputJob {
    pub grid: Grid,
    pub path: PathBuf,
}

impl OutputJob {
    /// Reports each tier's item count as a metric named after the tier.
    pub fn report_sizes(&self, logger: &mut dyn PipelineLogger) {
        for tier in self.grid.iter() {
            logger.metric(tier.name().unwrap_or_default(), tier.len() as f64);
        }
    }
}

/// Abstracts how decoded grids are written out.
///
/// This is a port (application-layer interface). Implementations decide
/// whether writes happen inline or on worker threads; either way the first
/// error stops the run and is returned. Returns the number of files
/// written.
pub trait PipelineExecutor: Send {
    fn execute(
        &self,
        jobs: &mut dyn Iterator<Item = Result<OutputJob, PipelineError>>,
        writer: &dyn GridWriter,
        logger: &mut dyn PipelineLogger,
    ) -> Result<usize, PipelineError>;
}

/// Writes each grid on the calling thread as soon as it is decoded.
#[derive(Default)]
pub struct SequentialPipelineExecutor;

impl PipelineExecutor for SequentialPipelineExecutor {
    fn execute(
        &self,
        jobs: &mut dyn Iterator<Item = Result<OutputJob, PipelineError>>,
        writer: &dyn GridWriter,
        logger: &mut dyn PipelineLogger,
    ) -> Result<usize, PipelineError> {
        let mut written = 0;
        for job in jobs {
            let job = job?;
            job.report_sizes(logger);
            writer
                .write_path(&job.grid, &job.path)
                .map_err(|source| PipelineError::Write {
                    path: job.path.clone(),
                    source,
                })?;
            written += 1;
            logger.progress(written);
        }
        Ok(written)
    }
}
