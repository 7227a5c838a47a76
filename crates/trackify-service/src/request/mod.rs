//! The change-request workflow: submit, list, detail, decide.

pub mod authorize;
pub mod service;

pub use authorize::can_decide;
pub use service::{RequestDetail, RequestScope, RequestService, SubmitRequest};
