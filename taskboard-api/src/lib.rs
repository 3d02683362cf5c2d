//! # Taskboard API Server Library
//!
//! HTTP surface of Taskboard: user accounts with session login, tasks with a
//! status field, and comments on tasks.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
