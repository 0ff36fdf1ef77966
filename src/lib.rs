//! # Callmon
//!
//! Call-center quality-monitoring backend: records customer service
//! calls, lets supervisors score them against a fixed rubric, and
//! exposes aggregate dashboards.
//!
//! ## Architecture
//!
//! - **domain**: entities, repository interfaces, errors and the access
//!   policy
//! - **application**: services and the scoring/aggregation logic
//! - **infrastructure**: database (SeaORM), migrations, crypto
//! - **interfaces**: REST API (Axum) with Swagger documentation
//! - **shared**: cross-cutting helper types

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database helpers for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::create_api_router;
