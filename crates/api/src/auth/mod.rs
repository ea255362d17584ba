//! Authentication and authorization

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtService};
pub use middleware::CurrentUser;
pub use password::{Argon2Hasher, Hasher};
