//! # Steward Shared Library
//!
//! Shared types and data access used by the Steward API server and the
//! backup daemon.
//!
//! ## Module Organization
//!
//! - `db`: engine selection, connection pool, schema bootstrap and seeding
//! - `models`: entity records and their CRUD operations
//! - `auth`: password hashing and the legacy-credential compatibility shim

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Steward shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
