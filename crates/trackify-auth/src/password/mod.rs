//! Password hashing and reset-token handling.

pub mod hasher;
pub mod reset;

pub use hasher::PasswordHasher;
pub use reset::ResetToken;
