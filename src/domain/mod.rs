//! Core business entities, repository interfaces and the access policy.

pub mod call;
pub mod error;
pub mod evaluation;
pub mod policy;
pub mod user;

pub use call::{
    Call, CallChanges, CallFilter, CallPriority, CallRepositoryInterface, CallStatus, NewCall,
};
pub use error::{DomainError, DomainResult};
pub use evaluation::{
    Evaluation, EvaluationFilter, EvaluationRepositoryInterface, EvaluationUpdate, NewEvaluation,
};
pub use policy::{authorize, Action, Actor};
pub use user::{NewUser, User, UserChanges, UserFilter, UserRepositoryInterface, UserRole};
