//! Change-request entities and the request state machine types.

pub mod model;
pub mod status;

pub use model::{ChangeRequest, CreateChangeRequest, RequestSummary};
pub use status::{RequestStatus, RequestTarget};
