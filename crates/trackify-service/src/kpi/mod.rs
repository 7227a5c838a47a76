//! KPI mutation with audited change history.

pub mod service;

pub use service::{KpiLogGroup, KpiService, group_log_views};
