//! # trackify-auth
//!
//! JWT access-token issuance and validation, Argon2id password hashing,
//! and single-use password-reset tokens.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, ResetToken};
