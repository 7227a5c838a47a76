//! Server-side notification feed.

pub mod service;

pub use service::FeedService;
