use async_trait::async_trait;
use tracing::info;

use crate::contact::ContactMessage;

/// Delivery seam for contact submissions. Swap in a mail transport without
/// touching the handler.
#[async_trait]
pub trait ContactNotifier: Send + Sync {
    async fn deliver(&self, message: &ContactMessage) -> anyhow::Result<()>;
}

/// Records submissions in the log only.
pub struct LogNotifier;

#[async_trait]
impl ContactNotifier for LogNotifier {
    async fn deliver(&self, message: &ContactMessage) -> anyhow::Result<()> {
        info!(
            id = %message.id,
            from = %message.email,
            subject = message.subject.as_deref().unwrap_or("(none)"),
            chars = message.message.chars().count(),
            "Contact message received from {}",
            message.name
        );
        Ok(())
    }
}
