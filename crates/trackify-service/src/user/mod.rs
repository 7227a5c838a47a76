//! User registration, login, profile, password reset and avatar
//! operations.

pub mod service;

pub use service::{LoginOutcome, RegisterRequest, UserService};
