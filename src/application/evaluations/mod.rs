//! Evaluation use-cases and rubric scoring.

pub mod scoring;
pub mod service;

pub use scoring::SubScores;
pub use service::{CreateEvaluation, EvaluationPatch, EvaluationService};
