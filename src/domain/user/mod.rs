//! User aggregate: entity, DTOs and repository interface.

pub mod dto;
pub mod model;
pub mod repository;

pub use dto::{NewUser, UserChanges, UserFilter};
pub use model::{User, UserRole};
pub use repository::UserRepositoryInterface;
