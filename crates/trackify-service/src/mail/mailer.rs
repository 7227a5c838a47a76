//! Mail delivery trait and the default log-only implementation.
//!
//! Sends are fire-and-forget: callers spawn them and a failed delivery
//! is logged at warn, never surfaced to the request.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use trackify_core::result::AppResult;

/// Delivers outbound email.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one message.
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}

/// Default mailer that writes messages to the log instead of an SMTP
/// relay. Real delivery plugs in behind the same trait.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        info!(to = %to, subject = %subject, body_len = body.len(), "Mail delivered to log");
        Ok(())
    }
}

/// Spawn a fire-and-forget send; delivery failures are logged and
/// swallowed.
pub fn send_detached(mailer: Arc<dyn Mailer>, to: String, subject: String, body: String) {
    tokio::spawn(async move {
        if let Err(e) = mailer.send(&to, &subject, &body).await {
            warn!(to = %to, subject = %subject, error = %e, "Mail delivery failed");
        }
    });
}
