//! Cross-cutting request processing.

pub mod authorization;
pub mod logging;

pub use authorization::{AccessTable, AuthorizationMiddleware};
pub use logging::LoggingMiddleware;
