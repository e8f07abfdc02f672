use serde::Serialize;

use super::evaluation_error::EvaluationError;
use crate::annotation::domain::grid::Grid;
use crate::annotation::domain::interval_tier::IntervalTier;

/// The join between two consecutive intervals: `"a"+"b"` at the end time
/// of the first.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Boundary {
    pub transition: String,
    pub time: f64,
}

/// Boundaries of the single interval tier called `tier_name`.
pub fn extract_boundaries(grid: &Grid, tier_name: &str) -> Result<Vec<Boundary>, EvaluationError> {
    let tier = match grid.all(tier_name).as_slice() {
        [] => return Err(EvaluationError::MissingTier(tier_name.to_string())),
        [tier] => *tier,
        many => {
            return Err(EvaluationError::AmbiguousTier {
                name: tier_name.to_string(),
                count: many.len(),
            })
        }
    };
    let intervals = tier
        .as_interval_tier()
        .ok_or_else(|| EvaluationError::NotIntervalTier(tier_name.to_string()))?;
    Ok(tier_boundaries(intervals))
}

pub fn tier_boundaries(tier: &IntervalTier) -> Vec<Boundary> {
    tier.intervals()
        .windows(2)
        .map(|pair| Boundary {
            transition: format!("\"{}\"+\"{}\"", pair[0].label, pair[1].label),
            time: pair[0].max_time,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::domain::point_tier::PointTier;

    fn phones() -> IntervalTier {
        let mut tier = IntervalTier::new("phones");
        tier.add(0.0, 0.1, "sil").unwrap();
        tier.add(0.1, 0.3, "ae").unwrap();
        tier.add(0.35, 0.6, "t").unwrap();
        tier
    }

    #[test]
    fn test_boundaries_follow_tier_order() {
        let mut grid = Grid::new();
        grid.append(phones()).unwrap();

        let boundaries = extract_boundaries(&grid, "phones").unwrap();

        assert_eq!(
            boundaries,
            vec![
                Boundary {
                    transition: "\"sil\"+\"ae\"".to_string(),
                    time: 0.1
                },
                Boundary {
                    transition: "\"ae\"+\"t\"".to_string(),
                    time: 0.3
                },
            ]
        );
    }

    #[test]
    fn test_single_interval_has_no_boundaries() {
        let mut tier = IntervalTier::new("phones");
        tier.add(0.0, 1.0, "sil").unwrap();
        assert!(tier_boundaries(&tier).is_empty());
        assert!(tier_boundaries(&IntervalTier::new("phones")).is_empty());
    }

    #[test]
    fn test_missing_tier() {
        let err = extract_boundaries(&Grid::new(), "phones").unwrap_err();
        assert_eq!(err, EvaluationError::MissingTier("phones".to_string()));
    }

    #[test]
    fn test_duplicate_tier_is_ambiguous() {
        let mut grid = Grid::new();
        grid.extend([phones(), phones()]).unwrap();

        let err = extract_boundaries(&grid, "phones").unwrap_err();
        assert_eq!(
            err,
            EvaluationError::AmbiguousTier {
                name: "phones".to_string(),
                count: 2
            }
        );
    }

    #[test]
    fn test_point_tier_is_rejected() {
        let mut grid = Grid::new();
        grid.append(PointTier::new("phones")).unwrap();
        let err = extract_boundaries(&grid, "phones").unwrap_err();
        assert_eq!(err, EvaluationError::NotIntervalTier("phones".to_string()));
    }
}
