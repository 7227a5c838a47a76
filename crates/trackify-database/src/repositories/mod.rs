//! Concrete repository implementations backed by PostgreSQL.

pub mod directory;
pub mod kpi;
pub mod kpi_log;
pub mod kra;
pub mod notification;
pub mod password_reset;
pub mod request;
pub mod user;

pub use directory::DirectoryRepository;
pub use kpi::KpiRepository;
pub use kpi_log::KpiLogRepository;
pub use kra::KraRepository;
pub use notification::NotificationRepository;
pub use password_reset::PasswordResetRepository;
pub use request::RequestRepository;
pub use user::UserRepository;
