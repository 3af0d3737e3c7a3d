//! # TaskGate Gateway
//!
//! Stateless reverse proxy in front of the auth authority, the user service
//! and the task service. It routes by path prefix, performs no
//! authentication and never retries.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `proxy`: Upstream selection, URL rewriting and forwarding
//! - `routes`: HTTP handlers

pub mod app;
pub mod config;
pub mod proxy;
pub mod routes;
