pub mod extractors;
pub mod jwt;
pub mod password;

pub use extractors::{AdminUser, AuthUser, StaffUser};
pub use jwt::{Claims, JwtError, JwtKeys};
pub use password::PasswordHasher;
