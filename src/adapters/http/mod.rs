//! Inbound HTTP endpoints called by the conversational front-end.

pub mod server;

pub use server::BotHttpServer;
