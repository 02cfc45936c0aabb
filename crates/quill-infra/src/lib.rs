//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL post store via SeaORM
//!
//! Without `postgres` only the in-memory store is available.

pub mod auth;
pub mod database;

pub use auth::{JwtConfig, JwtTokenService, RuntimeMode};
pub use database::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresPostRepository};
