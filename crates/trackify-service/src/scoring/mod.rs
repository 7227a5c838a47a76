//! KRA/KPI scoring and monthly review aggregation.

pub mod service;

pub use service::{MonthlyReview, ScoringService};
