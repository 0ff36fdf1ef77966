//! SeaORM implementations of the domain repository interfaces.

pub mod call_repository;
pub mod evaluation_repository;
pub mod user_repository;

pub use call_repository::CallRepository;
pub use evaluation_repository::EvaluationRepository;
pub use user_repository::UserRepository;

use crate::domain::DomainError;

/// Map an unexpected store failure to `Internal`.
pub(crate) fn internal(e: sea_orm::DbErr) -> DomainError {
    DomainError::Internal(format!("Database error: {}", e))
}

/// Map a store failure to `Conflict` when it is a unique-constraint
/// violation, `Internal` otherwise.
pub(crate) fn conflict_or_internal(e: sea_orm::DbErr, conflict_msg: &str) -> DomainError {
    let msg = e.to_string();
    if msg.contains("UNIQUE") || msg.contains("unique") || msg.contains("duplicate") {
        DomainError::Conflict(conflict_msg.to_string())
    } else {
        internal(e)
    }
}
