//! Telegram Bot API client.

use secrecy::{ExposeSecret, SecretString};

use crate::error::TelegramError;
use crate::telegram::types::{ApiResponse, ReplyMarkup, SendMessage, Update, User};

/// Long-poll timeout for `getUpdates`, in seconds.
const POLL_TIMEOUT_SECS: u32 = 30;

/// Thin client over the Bot API methods the bot needs:
/// `getMe`, `getUpdates`, `sendMessage`.
pub struct BotApi {
    token: SecretString,
    client: reqwest::Client,
}

impl BotApi {
    pub fn new(token: SecretString) -> Self {
        Self {
            token,
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!(
            "https://api.telegram.org/bot{}/{method}",
            self.token.expose_secret()
        )
    }

    /// Verify the token by asking Telegram who we are.
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// Long-poll for message updates after `offset`.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, TelegramError> {
        let body = serde_json::json!({
            "offset": offset,
            "timeout": POLL_TIMEOUT_SECS,
            "allowed_updates": ["message"],
        });
        self.call("getUpdates", &body).await
    }

    /// Send a plain-text message, optionally with reply markup.
    pub async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        reply_markup: Option<ReplyMarkup>,
    ) -> Result<(), TelegramError> {
        let body = SendMessage {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
            reply_markup,
        };
        // sendMessage returns the sent Message; nothing downstream needs it.
        let _: serde_json::Value = self.call("sendMessage", &body).await?;
        Ok(())
    }

    /// POST a method call and unwrap the `ApiResponse` envelope.
    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, TelegramError>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        let resp = self
            .client
            .post(self.api_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| TelegramError::RequestFailed {
                method: method.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TelegramError::ApiError {
                method: method.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ApiResponse<T> =
            resp.json().await.map_err(|e| TelegramError::InvalidResponse {
                method: method.to_string(),
                reason: e.to_string(),
            })?;

        if !envelope.ok {
            return Err(TelegramError::InvalidResponse {
                method: method.to_string(),
                reason: envelope
                    .description
                    .unwrap_or_else(|| "ok=false with no description".to_string()),
            });
        }

        envelope.result.ok_or_else(|| TelegramError::InvalidResponse {
            method: method.to_string(),
            reason: "ok=true but result missing".to_string(),
        })
    }
}
