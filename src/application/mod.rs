//! Business logic and use-cases, one service per aggregate.

pub mod calls;
pub mod dashboard;
pub mod evaluations;
pub mod identity;

pub use calls::CallService;
pub use dashboard::DashboardService;
pub use evaluations::EvaluationService;
pub use identity::IdentityService;
