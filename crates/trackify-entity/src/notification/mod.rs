//! Server-side feed notification entities.

pub mod model;

pub use model::{CreateFeedNotification, FeedNotification};
