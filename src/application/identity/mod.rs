//! Authentication and user management use-cases.

pub mod service;

pub use service::{AccountPatch, AuthTokens, IdentityService, RegisterUser};
