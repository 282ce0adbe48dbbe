//! Completion-time fan-out to the admin chat and the CRM.
//!
//! Both sinks are best-effort: every failure is logged and discarded
//! here, on purpose. The user-facing acknowledgement never depends on
//! the outcome.

use std::sync::Arc;

use async_trait::async_trait;

use crate::crm::CrmGateway;
use crate::error::TelegramError;
use crate::submission::Submission;
use crate::telegram::BotApi;

/// Sink for the human-readable submission summary.
#[async_trait]
pub trait AdminNotifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), TelegramError>;
}

/// `AdminNotifier` that sends to a fixed Telegram chat.
pub struct TelegramAdmin {
    api: Arc<BotApi>,
    chat_id: String,
}

impl TelegramAdmin {
    pub fn new(api: Arc<BotApi>, chat_id: String) -> Self {
        Self { api, chat_id }
    }
}

#[async_trait]
impl AdminNotifier for TelegramAdmin {
    async fn notify(&self, text: &str) -> Result<(), TelegramError> {
        self.api.send_message(&self.chat_id, text, None).await
    }
}

/// What actually happened during one dispatch. Logged, never shown
/// to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub admin_notified: bool,
    pub contact_id: Option<i64>,
    pub deal_created: bool,
}

/// Fans a completed submission out to the configured sinks. An
/// unconfigured sink (`None`) is skipped without any call.
pub struct Dispatcher {
    admin: Option<Arc<dyn AdminNotifier>>,
    crm: Option<Arc<dyn CrmGateway>>,
}

impl Dispatcher {
    pub fn new(admin: Option<Arc<dyn AdminNotifier>>, crm: Option<Arc<dyn CrmGateway>>) -> Self {
        Self { admin, crm }
    }

    /// Send the summary to the admin chat, then create the CRM contact
    /// and, if a contact id came back, the deal. Sequential; the deal
    /// waits on the contact.
    pub async fn dispatch(&self, submission: &Submission) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();

        if let Some(admin) = &self.admin {
            match admin.notify(&submission.admin_summary()).await {
                Ok(()) => outcome.admin_notified = true,
                Err(e) => tracing::warn!("Admin notification failed: {e}"),
            }
        }

        if let Some(crm) = &self.crm {
            match crm.create_contact(submission).await {
                Ok(Some(contact_id)) => {
                    outcome.contact_id = Some(contact_id);
                    match crm.create_deal(contact_id, submission).await {
                        Ok(()) => outcome.deal_created = true,
                        Err(e) => tracing::warn!("CRM deal creation failed: {e}"),
                    }
                }
                Ok(None) => {
                    tracing::warn!("CRM contact creation returned no id; skipping deal")
                }
                Err(e) => tracing::warn!("CRM contact creation failed: {e}"),
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::CrmError;
    use crate::submission::SubmitterIdentity;

    fn sample() -> Submission {
        Submission {
            name: "Иван".into(),
            cargo: "мебель".into(),
            dimensions: "2x1x1".into(),
            route: "Москва → Казань".into(),
            contact: "+79990000000".into(),
            submitter: SubmitterIdentity {
                display_name: "Иван".into(),
                handle: "—".into(),
            },
        }
    }

    #[derive(Default)]
    struct RecordingAdmin {
        messages: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl AdminNotifier for RecordingAdmin {
        async fn notify(&self, text: &str) -> Result<(), TelegramError> {
            if self.fail {
                return Err(TelegramError::RequestFailed {
                    method: "sendMessage".into(),
                    reason: "connection refused".into(),
                });
            }
            self.messages.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    /// Mock CRM with a scripted contact-creation result.
    struct ScriptedCrm {
        contact_result: Result<Option<i64>, ()>,
        deal_calls: AtomicUsize,
    }

    impl ScriptedCrm {
        fn new(contact_result: Result<Option<i64>, ()>) -> Self {
            Self {
                contact_result,
                deal_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CrmGateway for ScriptedCrm {
        async fn create_contact(&self, _: &Submission) -> Result<Option<i64>, CrmError> {
            self.contact_result.clone().map_err(|_| CrmError::HttpStatus {
                endpoint: "crm.contact.add.json".into(),
                status: 500,
            })
        }

        async fn create_deal(&self, _: i64, _: &Submission) -> Result<(), CrmError> {
            self.deal_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn unconfigured_sinks_do_nothing() {
        let dispatcher = Dispatcher::new(None, None);
        let outcome = dispatcher.dispatch(&sample()).await;
        assert_eq!(outcome, DispatchOutcome::default());
    }

    #[tokio::test]
    async fn admin_summary_reaches_the_notifier() {
        let admin = Arc::new(RecordingAdmin::default());
        let dispatcher = Dispatcher::new(Some(admin.clone()), None);

        let outcome = dispatcher.dispatch(&sample()).await;
        assert!(outcome.admin_notified);

        let messages = admin.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Иван"));
        assert!(messages[0].contains("+79990000000"));
    }

    #[tokio::test]
    async fn admin_failure_is_swallowed() {
        let admin = Arc::new(RecordingAdmin {
            fail: true,
            ..Default::default()
        });
        let crm = Arc::new(ScriptedCrm::new(Ok(Some(42))));
        let dispatcher = Dispatcher::new(Some(admin), Some(crm.clone()));

        let outcome = dispatcher.dispatch(&sample()).await;
        assert!(!outcome.admin_notified);
        // CRM dispatch still runs after the admin failure.
        assert_eq!(outcome.contact_id, Some(42));
        assert!(outcome.deal_created);
    }

    #[tokio::test]
    async fn deal_follows_successful_contact() {
        let crm = Arc::new(ScriptedCrm::new(Ok(Some(42))));
        let dispatcher = Dispatcher::new(None, Some(crm.clone()));

        let outcome = dispatcher.dispatch(&sample()).await;
        assert_eq!(outcome.contact_id, Some(42));
        assert!(outcome.deal_created);
        assert_eq!(crm.deal_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn deal_skipped_when_contact_yields_no_id() {
        let crm = Arc::new(ScriptedCrm::new(Ok(None)));
        let dispatcher = Dispatcher::new(None, Some(crm.clone()));

        let outcome = dispatcher.dispatch(&sample()).await;
        assert_eq!(outcome.contact_id, None);
        assert!(!outcome.deal_created);
        assert_eq!(crm.deal_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn deal_skipped_when_contact_creation_errors() {
        let crm = Arc::new(ScriptedCrm::new(Err(())));
        let dispatcher = Dispatcher::new(None, Some(crm.clone()));

        let outcome = dispatcher.dispatch(&sample()).await;
        assert_eq!(outcome.contact_id, None);
        assert_eq!(crm.deal_calls.load(Ordering::SeqCst), 0);
    }
}
