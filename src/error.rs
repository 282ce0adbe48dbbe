//! Error types for Freight Bot.

/// Top-level error type for the bot.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Telegram error: {0}")]
    Telegram(#[from] TelegramError),

    #[error("CRM error: {0}")]
    Crm(#[from] CrmError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Telegram Bot API errors.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("Telegram {method} request failed: {reason}")]
    RequestFailed { method: String, reason: String },

    #[error("Telegram {method} returned {status}: {body}")]
    ApiError {
        method: String,
        status: u16,
        body: String,
    },

    #[error("Invalid Telegram response for {method}: {reason}")]
    InvalidResponse { method: String, reason: String },
}

/// CRM webhook errors.
#[derive(Debug, thiserror::Error)]
pub enum CrmError {
    #[error("CRM {endpoint} request failed: {reason}")]
    RequestFailed { endpoint: String, reason: String },

    #[error("CRM {endpoint} returned HTTP {status}")]
    HttpStatus { endpoint: String, status: u16 },

    #[error("Invalid CRM response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },
}

/// Result type alias for the bot.
pub type Result<T> = std::result::Result<T, Error>;
