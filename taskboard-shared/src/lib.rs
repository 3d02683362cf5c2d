//! # Taskboard Shared Library
//!
//! Shared types, storage access, and authentication logic used by the
//! Taskboard API server.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool and schema bootstrap
//! - `models`: Users, tasks and comments with their SQL operations
//! - `auth`: Credential hashing, credential store and the session gate

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
