//! # Quill API Server
//!
//! HTTP surface for blog posts, built on Actix-web.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use state::AppState;
