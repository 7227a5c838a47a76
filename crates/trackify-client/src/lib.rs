//! # trackify-client
//!
//! The client-side notification aggregation view-model, independent of
//! any rendering library: local overlay state (read/pinned/deleted)
//! over a key-value store, due-soon KPI derivation, the feed merge, the
//! 06:00 daily-clear rule, and the unread-badge poller.

pub mod items;
pub mod merge;
pub mod overlay;
pub mod poller;
pub mod store;

pub use items::{ItemKind, PanelItem};
pub use merge::{badge_count, due_soon_items, merge_panel};
pub use overlay::NotificationOverlay;
pub use poller::{BadgePoller, FeedSource};
pub use store::{KeyValueStore, MemoryStore};
