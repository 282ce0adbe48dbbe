use std::sync::Arc;

use anyhow::Context;

use freight_bot::collector::FormCollector;
use freight_bot::config::Config;
use freight_bot::crm::{BitrixClient, CrmGateway};
use freight_bot::dispatch::{AdminNotifier, Dispatcher, TelegramAdmin};
use freight_bot::form::SessionStore;
use freight_bot::telegram::{self, BotApi};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  export BOT_TOKEN=123456:ABC-DEF...");
        std::process::exit(1);
    });

    eprintln!("🚚 Freight Bot v{}", env!("CARGO_PKG_VERSION"));
    eprintln!(
        "   Admin chat: {}",
        config.admin_chat_id.as_deref().unwrap_or("disabled")
    );
    eprintln!(
        "   Bitrix CRM: {}",
        if config.bitrix_webhook_url.is_some() {
            "enabled"
        } else {
            "disabled"
        }
    );

    let api = Arc::new(BotApi::new(config.bot_token.clone()));

    // Verify the token before entering the poll loop.
    let me = api.get_me().await.context("Telegram getMe check failed")?;
    eprintln!(
        "   Connected as @{}\n",
        me.username.as_deref().unwrap_or(&me.first_name)
    );

    let admin: Option<Arc<dyn AdminNotifier>> = config
        .admin_chat_id
        .map(|chat_id| Arc::new(TelegramAdmin::new(Arc::clone(&api), chat_id)) as _);
    let crm: Option<Arc<dyn CrmGateway>> = config
        .bitrix_webhook_url
        .map(|url| Arc::new(BitrixClient::new(url)) as _);

    let collector = FormCollector::new(SessionStore::new(), Dispatcher::new(admin, crm));

    // Each message is handled to completion, dispatch included, before
    // the next one is taken off the queue.
    let mut messages = telegram::spawn_poller(Arc::clone(&api));
    while let Some(message) = messages.recv().await {
        let Some(reply) = collector.process(&message).await else {
            continue;
        };
        let chat_id = message.chat.id.to_string();
        if let Err(e) = api.send_message(&chat_id, &reply.text, reply.markup).await {
            tracing::warn!("Failed to send reply to chat {chat_id}: {e}");
        }
    }

    Ok(())
}
