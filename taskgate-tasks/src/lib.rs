//! # TaskGate Task Service
//!
//! Owns task records. Every task route first validates the caller's bearer
//! token with the auth authority; only `/status` and `/health` are public.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `client`: Validate-token client for the auth authority
//! - `config`: Configuration management
//! - `db`: PostgreSQL pool and migrations
//! - `error`: Store and client errors mapped to HTTP
//! - `middleware`: Token-required guard
//! - `models`: Tasks and statuses
//! - `routes`: HTTP handlers
//! - `store`: `TaskStore` trait with in-memory and PostgreSQL backends

pub mod app;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod store;
