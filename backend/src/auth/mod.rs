//! Authentication module
//!
//! Provides bearer JWT authentication for every non-health route.

mod jwt;
mod middleware;

pub use jwt::{Claims, JwtService};
pub use middleware::{auth_middleware, AuthUser};
