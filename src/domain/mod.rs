//! Domain layer for the trendbot adapter
//!
//! Query and session models, the versioned progress scheme, and the ports
//! through which the services reach the analysis backend and the chat
//! platform.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
