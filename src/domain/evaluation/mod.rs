//! Evaluation aggregate: entity, DTOs and repository interface.

pub mod dto;
pub mod model;
pub mod repository;

pub use dto::{EvaluationFilter, EvaluationUpdate, NewEvaluation};
pub use model::Evaluation;
pub use repository::EvaluationRepositoryInterface;
