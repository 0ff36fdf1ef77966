//! Rubric scoring.
//!
//! The overall score of an evaluation is the arithmetic mean of the
//! sub-scores that were actually given, 0.0 when none were. It is
//! recomputed on every write that touches a sub-score and never cached
//! across edits.

use crate::domain::{DomainError, DomainResult, Evaluation};

pub const MIN_SUB_SCORE: i32 = 1;
pub const MAX_SUB_SCORE: i32 = 5;

/// The six rubric sub-scores of one evaluation, each 1-5 or absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubScores {
    pub greeting: Option<i32>,
    pub communication: Option<i32>,
    pub problem_solving: Option<i32>,
    pub empathy: Option<i32>,
    pub procedure: Option<i32>,
    pub closing: Option<i32>,
}

impl SubScores {
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        Self {
            greeting: evaluation.greeting_score,
            communication: evaluation.communication_score,
            problem_solving: evaluation.problem_solving_score,
            empathy: evaluation.empathy_score,
            procedure: evaluation.procedure_score,
            closing: evaluation.closing_score,
        }
    }

    fn named(&self) -> [(&'static str, Option<i32>); 6] {
        [
            ("greeting_score", self.greeting),
            ("communication_score", self.communication),
            ("problem_solving_score", self.problem_solving),
            ("empathy_score", self.empathy),
            ("procedure_score", self.procedure),
            ("closing_score", self.closing),
        ]
    }

    /// Reject any present sub-score outside 1-5.
    pub fn validate(&self) -> DomainResult<()> {
        for (name, value) in self.named() {
            if let Some(value) = value {
                if !(MIN_SUB_SCORE..=MAX_SUB_SCORE).contains(&value) {
                    return Err(DomainError::InvalidInput(format!(
                        "{} must be between {} and {}",
                        name, MIN_SUB_SCORE, MAX_SUB_SCORE
                    )));
                }
            }
        }
        Ok(())
    }

    /// Mean of the present sub-scores, 0.0 when none are present.
    /// Unrounded; presentation layers round to 2 decimals.
    pub fn overall(&self) -> f64 {
        let present: Vec<i32> = self.named().iter().filter_map(|(_, v)| *v).collect();
        if present.is_empty() {
            return 0.0;
        }
        present.iter().sum::<i32>() as f64 / present.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_present_is_exact_mean() {
        let scores = SubScores {
            greeting: Some(4),
            communication: Some(5),
            problem_solving: Some(3),
            empathy: Some(4),
            procedure: Some(2),
            closing: Some(5),
        };
        assert_eq!(scores.overall(), 23.0 / 6.0);
    }

    #[test]
    fn none_present_is_zero() {
        assert_eq!(SubScores::default().overall(), 0.0);
    }

    #[test]
    fn mean_covers_only_present_scores() {
        let scores = SubScores {
            greeting: Some(4),
            communication: Some(5),
            problem_solving: None,
            empathy: Some(3),
            procedure: None,
            closing: Some(5),
        };
        assert_eq!(scores.overall(), 4.25);
    }

    #[test]
    fn validate_accepts_bounds_and_absent() {
        let scores = SubScores {
            greeting: Some(MIN_SUB_SCORE),
            closing: Some(MAX_SUB_SCORE),
            ..Default::default()
        };
        assert!(scores.validate().is_ok());
        assert!(SubScores::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let low = SubScores {
            empathy: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            low.validate(),
            Err(DomainError::InvalidInput(_))
        ));

        let high = SubScores {
            procedure: Some(6),
            ..Default::default()
        };
        assert!(matches!(
            high.validate(),
            Err(DomainError::InvalidInput(_))
        ));
    }
}
