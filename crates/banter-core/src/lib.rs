//! Shared plumbing for Banter services: env-based configuration, tracing
//! setup, health endpoints, and request-id middleware.

pub mod config;
pub mod health;
pub mod middleware;
pub mod tracing;
