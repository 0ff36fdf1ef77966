//! Call aggregate: entity, DTOs and repository interface.

pub mod dto;
pub mod model;
pub mod repository;

pub use dto::{CallChanges, CallFilter, NewCall};
pub use model::{Call, CallPriority, CallStatus};
pub use repository::CallRepositoryInterface;
