//! Adapter for the trend analysis REST API.

pub mod client;

pub use client::TrendApiClient;
