pub mod dto;
pub mod handlers;

pub use dto::{CallDetailDto, CallDto};
pub use handlers::CallHandlerState;
