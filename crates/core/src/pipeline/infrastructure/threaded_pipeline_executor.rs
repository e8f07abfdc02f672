use std::path::PathBuf;

use crossbeam_channel::{Receiver, Sender};

use crate::pipeline::pipeline_error::PipelineError;
use crate::pipeline::pipeline_executor::{OutputJob, PipelineExecutor};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::textgrid::domain::grid_writer::GridWriter;

const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Writes grids on a pool of worker threads.
///
/// Layout: `decode (calling thread) → job channel → N writers → results`
///
/// Decoding stays sequential; only file output fans out, since every
/// utterance goes to its own file. After the first failure no further jobs
/// are dispatched, and the jobs already queued are allowed to finish.
pub struct ThreadedPipelineExecutor {
    workers: usize,
    channel_capacity: usize,
}

impl ThreadedPipelineExecutor {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl Default for ThreadedPipelineExecutor {
    fn default() -> Self {
        Self::new(
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        )
    }
}

impl PipelineExecutor for ThreadedPipelineExecutor {
    fn execute(
        &self,
        jobs: &mut dyn Iterator<Item = Result<OutputJob, PipelineError>>,
        writer: &dyn GridWriter,
        logger: &mut dyn PipelineLogger,
    ) -> Result<usize, PipelineError> {
        let (job_tx, job_rx) = crossbeam_channel::bounded::<OutputJob>(self.channel_capacity);
        let (done_tx, done_rx) = crossbeam_channel::unbounded::<Result<PathBuf, PipelineError>>();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..self.workers)
                .map(|_| {
                    let job_rx = job_rx.clone();
                    let done_tx = done_tx.clone();
                    scope.spawn(move || write_jobs(writer, job_rx, done_tx))
                })
                .collect();
            drop(job_rx);
            drop(done_tx);

            let mut progress = Progress::default();
            for job in jobs {
                match job {
                    Ok(job) => {
                        job.report_sizes(logger);
                        if job_tx.send(job).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        progress.fail(e);
                        break;
                    }
                }
                while let Ok(result) = done_rx.try_recv() {
                    progress.record(result, logger);
                }
                if progress.first_error.is_some() {
                    break;
                }
            }
            drop(job_tx);

            for result in done_rx {
                progress.record(result, logger);
            }
            for handle in handles {
                if handle.join().is_err() {
                    progress.fail(PipelineError::WorkerPanicked);
                }
            }

            match progress.first_error {
                Some(e) => Err(e),
                None => Ok(progress.written),
            }
        })
    }
}

fn write_jobs(
    writer: &dyn GridWriter,
    job_rx: Receiver<OutputJob>,
    done_tx: Sender<Result<PathBuf, PipelineError>>,
) {
    for job in job_rx {
        let result = match writer.write_path(&job.grid, &job.path) {
            Ok(()) => Ok(job.path),
            Err(source) => Err(PipelineError::Write {
                path: job.path,
                source,
            }),
        };
        if done_tx.send(result).is_err() {
            break;
        }
    }
}

#[derive(Default)]
struct Progress {
    written: usize,
    first_error: Option<PipelineError>,
}

impl Progress {
    fn record(&mut self, result: Result<PathBuf, PipelineError>, logger: &mut dyn PipelineLogger) {
        match result {
            Ok(path) => {
                self.written += 1;
                log::debug!("wrote {}", path.display());
                logger.progress(self.written);
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, error: PipelineError) {
        if self.first_error.is_none() {
            self.first_error = Some(error);
        }
    }
}
