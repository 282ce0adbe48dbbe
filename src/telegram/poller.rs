//! Long-poll update source.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::telegram::BotApi;
use crate::telegram::types::Message;

/// How long to back off after a failed poll before retrying.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Spawn the `getUpdates` loop and return the stream of inbound
/// text messages. Non-text updates are skipped; poll errors are
/// logged and retried after a short delay.
pub fn spawn_poller(api: Arc<BotApi>) -> mpsc::UnboundedReceiver<Message> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut offset: i64 = 0;

        tracing::info!("Telegram poller listening for messages...");

        loop {
            let updates = match api.get_updates(offset).await {
                Ok(updates) => updates,
                Err(e) => {
                    tracing::warn!("Telegram poll error: {e}");
                    tokio::time::sleep(POLL_RETRY_DELAY).await;
                    continue;
                }
            };

            for update in updates {
                // Advance offset past this update
                offset = offset.max(update.update_id + 1);

                let Some(message) = update.message else {
                    continue;
                };
                if message.text.is_none() {
                    continue;
                }

                if tx.send(message).is_err() {
                    tracing::info!("Telegram poller channel closed");
                    return;
                }
            }
        }
    });

    rx
}
