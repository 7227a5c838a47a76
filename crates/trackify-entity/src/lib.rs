//! # trackify-entity
//!
//! Domain entity models shared by the database, service, and API layers.
//! Entities map 1:1 to database rows via sqlx `FromRow` derives; view
//! structs carry the denormalized display fields produced by joins.

pub mod kpi;
pub mod notification;
pub mod org;
pub mod request;
pub mod user;
