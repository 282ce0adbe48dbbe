//! Freight Bot — Telegram form collector for freight requests.

pub mod collector;
pub mod config;
pub mod crm;
pub mod dispatch;
pub mod error;
pub mod form;
pub mod submission;
pub mod telegram;
