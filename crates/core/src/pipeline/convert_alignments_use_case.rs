use std::collections::HashSet;
use std::path::Path;

use crate::alignment::domain::mlf_error::MlfError;
use crate::alignment::domain::utterance_name::textgrid_file_name;
use crate::annotation::domain::grid::Grid;
use crate::textgrid::domain::grid_writer::GridWriter;

use super::pipeline_error::PipelineError;
use super::pipeline_executor::{OutputJob, PipelineExecutor};
use super::pipeline_logger::PipelineLogger;

/// What a conversion run produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvertSummary {
    pub written: usize,
    /// Utterances with at least one empty tier.
    pub with_empty_tiers: usize,
}

/// Turns a stream of decoded utterances into one TextGrid file each.
///
/// Output files are named after the utterance (see
/// [`textgrid_file_name`]); two utterances that would land on the same file
/// stop the run. Empty tiers are logged and counted, not rejected.
pub struct ConvertAlignmentsUseCase {
    writer: Box<dyn GridWriter>,
    executor: Box<dyn PipelineExecutor>,
    logger: Box<dyn PipelineLogger>,
}

impl ConvertAlignmentsUseCase {
    pub fn new(
        writer: Box<dyn GridWriter>,
        executor: Box<dyn PipelineExecutor>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            writer,
            executor,
            logger,
        }
    }

    pub fn execute<I>(&mut self, grids: I, output_dir: &Path) -> Result<ConvertSummary, PipelineError>
    where
        I: IntoIterator<Item = Result<Grid, MlfError>>,
    {
        std::fs::create_dir_all(output_dir).map_err(|source| PipelineError::OutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let mut seen = HashSet::new();
        let mut with_empty_tiers = 0;

        let mut jobs = grids.into_iter().map(|decoded| {
            let grid = decoded?;
            let name = grid.name().unwrap_or_default();
            let path = output_dir.join(textgrid_file_name(name));
            if !seen.insert(path.clone()) {
                return Err(PipelineError::DuplicateOutput(path));
            }

            let empty: Vec<&str> = grid
                .iter()
                .filter(|tier| tier.is_empty())
                .map(|tier| tier.name().unwrap_or_default())
                .collect();
            if !empty.is_empty() {
                log::warn!("{name}: empty tier(s) {}", empty.join(", "));
                with_empty_tiers += 1;
            }

            Ok(OutputJob { grid, path })
        });

        let result = self
            .executor
            .execute(&mut jobs, self.writer.as_ref(), self.logger.as_mut());
        drop(jobs);

        let written = result?;
        self.logger.info(&format!(
            "Wrote {written} TextGrid(s) to {}",
            output_dir.display()
        ));
        if with_empty_tiers > 0 {
            self.logger
                .info(&format!("{with_empty_tiers} utterance(s) had empty tiers"));
        }
        self.logger.summary();

        Ok(ConvertSummary {
            written,
            with_empty_tiers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::domain::decoder_config::DecoderConfig;
    use crate::alignment::infrastructure::mlf_decoder::MlfDecoder;
    use crate::pipeline::infrastructure::threaded_pipeline_executor::ThreadedPipelineExecutor;
    use crate::pipeline::pipeline_executor::SequentialPipelineExecutor;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::textgrid::domain::grid_reader::GridReader;
    use crate::textgrid::infrastructure::praat_text_reader::PraatTextReader;
    use crate::textgrid::infrastructure::praat_text_writer::PraatTextWriter;
    use rstest::rstest;
    use std::sync::{Arc, Mutex};

    const MLF: &str = "#!MLF!#
\"*/utt1.lab\"
0 1000000 sil w1
1000000 3000000 ae w1
3000000 3500000 sp
3500000 6000000 t w2
.
\"*/utt2.rec\"
0 2000000 sil
.
";

    fn decoded(text: &str) -> MlfDecoder<&[u8]> {
        MlfDecoder::new(text.as_bytes(), DecoderConfig::default()).unwrap()
    }

    fn use_case(executor: Box<dyn PipelineExecutor>) -> ConvertAlignmentsUseCase {
        ConvertAlignmentsUseCase::new(
            Box::new(PraatTextWriter::new()),
            executor,
            Box::new(NullPipelineLogger),
        )
    }

    /// Captures metrics and messages so tests can inspect them.
    #[derive(Clone, Default)]
    struct CapturingLogger {
        messages: Arc<Mutex<Vec<String>>>,
        metrics: Arc<Mutex<Vec<(String, f64)>>>,
    }

    impl PipelineLogger for CapturingLogger {
        fn progress(&mut self, _completed: usize) {}

        fn metric(&mut self, name: &str, value: f64) {
            self.metrics.lock().unwrap().push((name.to_string(), value));
        }

        fn info(&mut self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    #[test]
    fn test_writes_one_textgrid_per_utterance() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("grids");

        let summary = use_case(Box::new(SequentialPipelineExecutor))
            .execute(decoded(MLF), &out)
            .unwrap();

        assert_eq!(summary.written, 2);
        assert_eq!(summary.with_empty_tiers, 1);

        let grid = PraatTextReader::new()
            .read_path(&out.join("utt1.TextGrid"))
            .unwrap();
        assert_eq!(grid.names(), vec![Some("phones"), Some("words")]);
        let words: Vec<_> = grid
            .first("words")
            .and_then(|t| t.as_interval_tier())
            .unwrap()
            .iter()
            .map(|iv| iv.label.clone())
            .collect();
        assert_eq!(words, vec!["w1", "sp", "w2"]);
        assert!(out.join("utt2.TextGrid").exists());
    }

    #[test]
    fn test_threaded_executor_produces_same_files() {
        let dir = tempfile::tempdir().unwrap();
        let sequential = dir.path().join("seq");
        let threaded = dir.path().join("par");

        use_case(Box::new(SequentialPipelineExecutor))
            .execute(decoded(MLF), &sequential)
            .unwrap();
        use_case(Box::new(ThreadedPipelineExecutor::new(2)))
            .execute(decoded(MLF), &threaded)
            .unwrap();

        for name in ["utt1.TextGrid", "utt2.TextGrid"] {
            assert_eq!(
                std::fs::read_to_string(sequential.join(name)).unwrap(),
                std::fs::read_to_string(threaded.join(name)).unwrap()
            );
        }
    }

    #[test]
    fn test_duplicate_output_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let text = "#!MLF!#\n\"a/utt.lab\"\n0 1 x\n.\n\"b/utt.lab\"\n0 1 x\n.\n";

        let err = use_case(Box::new(SequentialPipelineExecutor))
            .execute(decoded(text), dir.path())
            .unwrap_err();

        assert!(matches!(err, PipelineError::DuplicateOutput(p) if p.ends_with("utt.TextGrid")));
    }

    #[test]
    fn test_decode_error_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        let err = use_case(Box::new(SequentialPipelineExecutor))
            .execute(decoded("#!MLF!#\n\"u\"\n0 1 a\n"), dir.path())
            .unwrap_err();
        assert!(matches!(err, PipelineError::Decode(MlfError::Format { .. })));
    }

    #[test]
    fn test_unwritable_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        let err = use_case(Box::new(SequentialPipelineExecutor))
            .execute(decoded(MLF), &blocker.join("out"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::OutputDir { .. }));
    }

    #[rstest]
    #[case::sequential(Box::new(SequentialPipelineExecutor))]
    #[case::threaded(Box::new(ThreadedPipelineExecutor::new(2)))]
    fn test_reports_tier_sizes_and_summary(#[case] executor: Box<dyn PipelineExecutor>) {
        let dir = tempfile::tempdir().unwrap();
        let logger = CapturingLogger::default();
        let mut use_case = ConvertAlignmentsUseCase::new(
            Box::new(PraatTextWriter::new()),
            executor,
            Box::new(logger.clone()),
        );

        use_case.execute(decoded(MLF), dir.path()).unwrap();

        let metrics = logger.metrics.lock().unwrap();
        assert!(metrics.contains(&("phones".to_string(), 3.0)));
        assert!(metrics.contains(&("words".to_string(), 0.0)));
        assert_eq!(metrics.len(), 4);
        let messages = logger.messages.lock().unwrap();
        assert!(messages[0].starts_with("Wrote 2 TextGrid(s)"));
        assert_eq!(messages[1], "1 utterance(s) had empty tiers");
    }
}
