//! KRA and KPI entities plus the append-only KPI change log.

pub mod kra;
pub mod log;
pub mod model;

pub use kra::Kra;
pub use log::KpiLogView;
pub use model::{Kpi, KpiScore, UpdateKpi};
