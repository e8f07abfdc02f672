use serde::Serialize;

use super::boundary::{extract_boundaries, Boundary};
use super::evaluation_error::EvaluationError;
use crate::annotation::domain::grid::Grid;

/// Outcome of comparing two boundary sequences.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AgreementReport {
    pub tier: String,
    pub tolerance_ms: f64,
    /// Boundaries within tolerance of each other.
    pub concordant: usize,
    pub discordant: usize,
}

impl AgreementReport {
    pub fn total(&self) -> usize {
        self.concordant + self.discordant
    }

    /// `concordant / total`, or `None` when there were no boundaries.
    pub fn agreement(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.concordant as f64 / total as f64),
        }
    }
}

/// Measures how closely two annotations of the same material agree on
/// where boundaries fall in one tier.
///
/// Both grids must carry exactly one interval tier with the given name,
/// and the tiers must have the same sequence of transitions. Boundaries are
/// concordant when their times differ by strictly less than the tolerance.
#[derive(Clone, Debug)]
pub struct BoundaryAgreement {
    tier: String,
    tolerance_ms: f64,
}

impl BoundaryAgreement {
    pub fn new(tier: impl Into<String>, tolerance_ms: f64) -> Result<Self, EvaluationError> {
        if !(tolerance_ms.is_finite() && tolerance_ms >= 0.0) {
            return Err(EvaluationError::InvalidTolerance(tolerance_ms));
        }
        Ok(Self {
            tier: tier.into(),
            tolerance_ms,
        })
    }

    pub fn evaluate(&self, first: &Grid, second: &Grid) -> Result<AgreementReport, EvaluationError> {
        let first = extract_boundaries(first, &self.tier)?;
        let second = extract_boundaries(second, &self.tier)?;
        self.compare(&first, &second)
    }

    pub fn compare(
        &self,
        first: &[Boundary],
        second: &[Boundary],
    ) -> Result<AgreementReport, EvaluationError> {
        if first.len() != second.len() {
            return Err(EvaluationError::LengthMismatch {
                first: first.len(),
                second: second.len(),
            });
        }

        let tolerance = self.tolerance_ms / 1000.0;
        let mut concordant = 0;
        let mut discordant = 0;
        for (index, (a, b)) in first.iter().zip(second).enumerate() {
            if a.transition != b.transition {
                return Err(EvaluationError::LabelMismatch {
                    index,
                    first: a.transition.clone(),
                    second: b.transition.clone(),
                });
            }
            if (a.time - b.time).abs() < tolerance {
                concordant += 1;
            } else {
                discordant += 1;
            }
        }

        log::debug!(
            "{concordant} concordant, {discordant} discordant boundaries on tier {}",
            self.tier
        );
        Ok(AgreementReport {
            tier: self.tier.clone(),
            tolerance_ms: self.tolerance_ms,
            concordant,
            discordant,
        })
    }
}
