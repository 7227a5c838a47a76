//! Outbound mail seam.

pub mod mailer;

pub use mailer::{LogMailer, Mailer};
