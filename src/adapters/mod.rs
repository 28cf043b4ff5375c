//! Adapters for external systems.

pub mod http;
pub mod sbf;
pub mod trend_api;
