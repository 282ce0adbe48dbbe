//! Telegram transport: Bot API client, typed models, update poller.

pub mod api;
pub mod poller;
pub mod types;

pub use api::BotApi;
pub use poller::spawn_poller;
