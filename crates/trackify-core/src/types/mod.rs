//! Core type definitions used across the Trackify workspace.

pub mod response;

pub use response::ApiErrorResponse;
