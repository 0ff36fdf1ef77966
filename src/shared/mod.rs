//! Cross-cutting helper types.

pub mod pagination;

pub use pagination::PaginatedResult;
