//! Call lifecycle use-cases.

pub mod service;

pub use service::{CallService, CreateCall};
