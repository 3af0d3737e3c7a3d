//! # TaskGate Shared Library
//!
//! This crate contains the types and utilities shared by the three TaskGate
//! services: the auth authority, the task service and the gateway.
//!
//! ## Module Organization
//!
//! - `auth`: Bearer parsing, opaque tokens, password hashing, identity wire types
//! - `error`: HTTP-facing error type and JSON error body
//! - `extract`: JSON extractor that reports rejections as `ApiError`
//! - `layers`: CORS policy shared by the service routers
//! - `telemetry`: Tracing subscriber bootstrap
//! - `shutdown`: Graceful shutdown signal for `axum::serve`

pub mod auth;
pub mod error;
pub mod extract;
pub mod layers;
pub mod shutdown;
pub mod telemetry;

/// Current version of the TaskGate shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
