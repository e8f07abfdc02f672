use std::path::Path;

use crate::annotation::domain::grid::Grid;
use crate::evaluation::domain::boundary_agreement::{AgreementReport, BoundaryAgreement};
use crate::textgrid::domain::grid_reader::GridReader;

use super::pipeline_error::PipelineError;

/// Scores how well two annotation files agree on one tier's boundaries.
pub struct EvaluateBoundariesUseCase {
    reader: Box<dyn GridReader>,
    agreement: BoundaryAgreement,
}

impl EvaluateBoundariesUseCase {
    pub fn new(reader: Box<dyn GridReader>, agreement: BoundaryAgreement) -> Self {
        Self { reader, agreement }
    }

    pub fn execute(&self, first: &Path, second: &Path) -> Result<AgreementReport, PipelineError> {
        let first_grid = self.read(first)?;
        let second_grid = self.read(second)?;
        let report = self.agreement.evaluate(&first_grid, &second_grid)?;
        log::info!(
            "{} vs {}: {}/{} boundaries within tolerance",
            first.display(),
            second.display(),
            report.concordant,
            report.total()
        );
        Ok(report)
    }

    fn read(&self, path: &Path) -> Result<Grid, PipelineError> {
        self.reader
            .read_path(path)
            .map_err(|source| PipelineError::Read {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::domain::interval_tier::IntervalTier;
    use crate::evaluation::domain::evaluation_error::EvaluationError;
    use crate::textgrid::domain::textgrid_error::TextGridError;
    use std::collections::HashMap;
    use std::io::BufRead;
    use std::path::PathBuf;

    // --- Stubs ---

    struct StubReader {
        grids: HashMap<PathBuf, Grid>,
    }

    impl GridReader for StubReader {
        fn read(&self, _source: &mut dyn BufRead) -> Result<Grid, TextGridError> {
            unreachable!("tests read by path")
        }

        fn read_path(&self, path: &Path) -> Result<Grid, TextGridError> {
            self.grids.get(path).cloned().ok_or_else(|| TextGridError::Format {
                line: 1,
                message: "unknown file".to_string(),
            })
        }
    }

    fn phones(spans: &[(f64, f64, &str)]) -> Grid {
        let mut tier = IntervalTier::new("phones");
        for &(min, max, label) in spans {
            tier.add(min, max, label).unwrap();
        }
        let mut grid = Grid::new();
        grid.append(tier).unwrap();
        grid
    }

    fn use_case() -> EvaluateBoundariesUseCase {
        let mut grids = HashMap::new();
        grids.insert(
            PathBuf::from("manual"),
            phones(&[(0.0, 0.1, "sil"), (0.1, 0.3, "ae"), (0.3, 0.5, "t")]),
        );
        grids.insert(
            PathBuf::from("aligned"),
            phones(&[(0.0, 0.105, "sil"), (0.105, 0.36, "ae"), (0.36, 0.5, "t")]),
        );
        grids.insert(PathBuf::from("other"), phones(&[(0.0, 0.5, "sil")]));
        EvaluateBoundariesUseCase::new(
            Box::new(StubReader { grids }),
            BoundaryAgreement::new("phones", 20.0).unwrap(),
        )
    }

    #[test]
    fn test_scores_boundaries() {
        let report = use_case()
            .execute(Path::new("manual"), Path::new("aligned"))
            .unwrap();
        assert_eq!((report.concordant, report.discordant), (1, 1));
        assert_eq!(report.agreement(), Some(0.5));
    }

    #[test]
    fn test_unreadable_file_names_path() {
        let err = use_case()
            .execute(Path::new("manual"), Path::new("missing"))
            .unwrap_err();
        match err {
            PipelineError::Read { path, .. } => assert_eq!(path, PathBuf::from("missing")),
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn test_mismatched_tiers_fail() {
        let err = use_case()
            .execute(Path::new("manual"), Path::new("other"))
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Evaluation(EvaluationError::LengthMismatch { first: 2, second: 0 })
        ));
    }
}
