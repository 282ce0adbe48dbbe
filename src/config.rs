//! Environment-sourced configuration.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Bot configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram Bot API token.
    pub bot_token: SecretString,
    /// Chat that receives submission summaries. `None` disables the
    /// admin notification entirely.
    pub admin_chat_id: Option<String>,
    /// Bitrix webhook base URL. `None` disables both CRM calls.
    pub bitrix_webhook_url: Option<String>,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// `BOT_TOKEN` is required; `ADMIN_CHAT_ID` and `BITRIX_WEBHOOK_URL`
    /// are optional, and an empty value counts as unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = non_empty_var("BOT_TOKEN")
            .ok_or_else(|| ConfigError::MissingEnvVar("BOT_TOKEN".to_string()))?;

        Ok(Self {
            bot_token: SecretString::from(bot_token),
            admin_chat_id: non_empty_var("ADMIN_CHAT_ID"),
            bitrix_webhook_url: non_empty_var("BITRIX_WEBHOOK_URL").map(normalize_webhook_url),
        })
    }
}

/// Read an env var, treating empty/whitespace-only values as unset.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Strip trailing slashes so endpoint joins don't produce `//`.
fn normalize_webhook_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
