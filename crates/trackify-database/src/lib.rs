//! # trackify-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations for all Trackify entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
