//! HTTP API: server wiring, access-control middleware, and list handlers.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
