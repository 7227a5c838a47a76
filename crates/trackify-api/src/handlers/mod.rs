//! HTTP request handlers, organized by domain.

pub mod auth;
pub mod health;
pub mod kpi;
pub mod notification;
pub mod request;
pub mod scoring;
pub mod user;
