//! # trackify-service
//!
//! Domain services sitting between the HTTP layer and the repositories:
//! user registration/login, KPI mutation with change-log append, KRA
//! scoring, the request/approval workflow, and the notification feed.

pub mod context;
pub mod kpi;
pub mod mail;
pub mod notification;
pub mod request;
pub mod scoring;
pub mod user;

pub use context::RequestContext;
