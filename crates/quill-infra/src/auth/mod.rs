//! Authentication implementations.

mod jwt;

pub use jwt::{JwtConfig, JwtConfigError, JwtTokenService, RuntimeMode};
