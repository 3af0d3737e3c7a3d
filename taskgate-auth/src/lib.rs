//! # TaskGate Auth Authority
//!
//! Issues, validates and revokes opaque session tokens. It is the only
//! component that reads or writes the credential and token stores.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `authority`: Token lifecycle (register, login, validate, logout)
//! - `config`: Configuration management
//! - `error`: Authority errors and their HTTP mapping
//! - `routes`: HTTP handlers
//! - `store`: Concurrency-safe credential and token stores

pub mod app;
pub mod authority;
pub mod config;
pub mod error;
pub mod routes;
pub mod store;
