//! Bitrix CRM gateway.
//!
//! Two webhook calls: `crm.contact.add.json` then `crm.deal.add.json`.
//! Callers decide what to do with failures; this module only reports them.

use async_trait::async_trait;

use crate::error::CrmError;
use crate::submission::Submission;

const CONTACT_ADD: &str = "crm.contact.add.json";
const DEAL_ADD: &str = "crm.deal.add.json";

/// Deal stage every new request lands in.
const DEAL_STAGE: &str = "NEW";

/// CRM operations used at completion time.
#[async_trait]
pub trait CrmGateway: Send + Sync {
    /// Create a contact; returns the new contact id when the CRM
    /// yields one.
    async fn create_contact(&self, submission: &Submission) -> Result<Option<i64>, CrmError>;

    /// Create a deal attached to `contact_id`.
    async fn create_deal(&self, contact_id: i64, submission: &Submission) -> Result<(), CrmError>;
}

/// `CrmGateway` over a Bitrix inbound webhook.
pub struct BitrixClient {
    base_url: String,
    client: reqwest::Client,
}

impl BitrixClient {
    /// `base_url` is the webhook root, without a trailing slash.
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    async fn post(
        &self,
        endpoint: &str,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, CrmError> {
        let url = format!("{}/{endpoint}", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| CrmError::RequestFailed {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CrmError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        resp.json().await.map_err(|e| CrmError::InvalidResponse {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl CrmGateway for BitrixClient {
    async fn create_contact(&self, submission: &Submission) -> Result<Option<i64>, CrmError> {
        let body = self.post(CONTACT_ADD, &contact_payload(submission)).await?;
        Ok(extract_contact_id(&body))
    }

    async fn create_deal(&self, contact_id: i64, submission: &Submission) -> Result<(), CrmError> {
        self.post(DEAL_ADD, &deal_payload(contact_id, submission))
            .await?;
        Ok(())
    }
}

/// Body for `crm.contact.add.json`.
pub fn contact_payload(submission: &Submission) -> serde_json::Value {
    serde_json::json!({
        "fields": {
            "NAME": submission.name,
            "PHONE": [{"VALUE": submission.contact, "VALUE_TYPE": "WORK"}],
            "COMMENTS": submission.contact_comments(),
        }
    })
}

/// Body for `crm.deal.add.json`.
pub fn deal_payload(contact_id: i64, submission: &Submission) -> serde_json::Value {
    serde_json::json!({
        "fields": {
            "TITLE": submission.deal_title(),
            "CONTACT_ID": contact_id,
            "COMMENTS": submission.deal_comments(),
            "STAGE_ID": DEAL_STAGE,
        }
    })
}

/// Pull the new contact id out of a Bitrix response body. Bitrix
/// returns `{"result": <id>}`; a missing or non-numeric `result`
/// counts as "no identifier".
pub fn extract_contact_id(body: &serde_json::Value) -> Option<i64> {
    let result = body.get("result")?;
    result
        .as_i64()
        .or_else(|| result.as_str().and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::SubmitterIdentity;

    fn sample() -> Submission {
        Submission {
            name: "Иван".into(),
            cargo: "мебель".into(),
            dimensions: "2x1x1, 300кг".into(),
            route: "Москва → Казань".into(),
            contact: "+79990000000".into(),
            submitter: SubmitterIdentity {
                display_name: "Иван Петров".into(),
                handle: "@ivan".into(),
            },
        }
    }

    #[test]
    fn contact_payload_shape() {
        let payload = contact_payload(&sample());
        let fields = &payload["fields"];
        assert_eq!(fields["NAME"], "Иван");
        assert_eq!(fields["PHONE"][0]["VALUE"], "+79990000000");
        assert_eq!(fields["PHONE"][0]["VALUE_TYPE"], "WORK");
        let comments = fields["COMMENTS"].as_str().unwrap();
        assert!(comments.contains("Маршрут: Москва → Казань"));
        assert!(comments.contains("Telegram: Иван Петров (@ivan)"));
    }

    #[test]
    fn deal_payload_shape() {
        let payload = deal_payload(42, &sample());
        let fields = &payload["fields"];
        assert_eq!(fields["TITLE"], "Перевозка: Москва → Казань");
        assert_eq!(fields["CONTACT_ID"], 42);
        assert_eq!(fields["STAGE_ID"], "NEW");
        assert!(
            fields["COMMENTS"]
                .as_str()
                .unwrap()
                .contains("Контакт: +79990000000")
        );
    }

    #[test]
    fn extract_contact_id_from_number() {
        let body = serde_json::json!({"result": 42});
        assert_eq!(extract_contact_id(&body), Some(42));
    }

    #[test]
    fn extract_contact_id_from_numeric_string() {
        let body = serde_json::json!({"result": "42"});
        assert_eq!(extract_contact_id(&body), Some(42));
    }

    #[test]
    fn extract_contact_id_missing_or_malformed() {
        assert_eq!(extract_contact_id(&serde_json::json!({})), None);
        assert_eq!(
            extract_contact_id(&serde_json::json!({"error": "boom"})),
            None
        );
        assert_eq!(
            extract_contact_id(&serde_json::json!({"result": {"ID": 42}})),
            None
        );
        assert_eq!(
            extract_contact_id(&serde_json::json!({"result": "not-a-number"})),
            None
        );
    }
}
