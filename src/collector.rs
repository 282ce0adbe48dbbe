//! The form collector: classifies inbound messages and drives the
//! per-user walk through the five prompts.

use crate::dispatch::Dispatcher;
use crate::form::SessionStore;
use crate::form::prompts::{self, ENTRY_BUTTON_LABEL, prompt_for};
use crate::form::state::{FormState, Transition, classify, transition};
use crate::submission::{Submission, SubmitterIdentity};
use crate::telegram::types::{Message, ReplyMarkup};

/// One outbound reply to the chat the message came from.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub markup: Option<ReplyMarkup>,
}

impl Reply {
    fn text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            markup: None,
        }
    }
}

/// Walks users through the form. Holds the session store and the
/// completion dispatcher; transport-agnostic beyond the `Message` type.
pub struct FormCollector {
    sessions: SessionStore,
    dispatcher: Dispatcher,
}

impl FormCollector {
    pub fn new(sessions: SessionStore, dispatcher: Dispatcher) -> Self {
        Self {
            sessions,
            dispatcher,
        }
    }

    /// Apply one inbound message. Returns the single reply to send,
    /// or `None` when the message matches no handler.
    pub async fn process(&self, message: &Message) -> Option<Reply> {
        let text = message.text.as_deref()?;
        let user = message.from.as_ref()?;

        let state = self.sessions.state_of(user.id).await;
        match transition(state, classify(text)) {
            Transition::Ignored => None,

            Transition::Entered => {
                self.sessions.create(user.id).await;
                tracing::info!(user_id = user.id, "Form started");
                Some(Reply {
                    text: prompts::GREETING.to_string(),
                    markup: Some(ReplyMarkup::one_button(ENTRY_BUTTON_LABEL)),
                })
            }

            Transition::Cancelled => {
                self.sessions.take(user.id).await;
                tracing::info!(user_id = user.id, "Form cancelled");
                Some(Reply::text(prompts::CANCELLED))
            }

            Transition::Advanced { field, next } => {
                self.sessions.record(user.id, field, text, next).await;
                Some(next_prompt(next))
            }

            Transition::Completed { field } => {
                let session = self.sessions.take(user.id).await?;
                let mut answers = session.answers;
                answers.push((field, text.to_string()));

                match Submission::from_answers(&answers, SubmitterIdentity::of(user)) {
                    Some(submission) => {
                        let outcome = self.dispatcher.dispatch(&submission).await;
                        tracing::info!(
                            user_id = user.id,
                            admin_notified = outcome.admin_notified,
                            contact_id = outcome.contact_id,
                            deal_created = outcome.deal_created,
                            "Form completed"
                        );
                    }
                    // Unreachable while the walk invariant holds.
                    None => tracing::error!(user_id = user.id, "Completed form missing answers"),
                }

                Some(Reply::text(prompts::COMPLETED))
            }
        }
    }
}

/// The prompt sent on entering `state`. The first answer clears the
/// entry keyboard.
fn next_prompt(state: FormState) -> Reply {
    let markup = match state {
        FormState::AwaitingCargo => Some(ReplyMarkup::remove_keyboard()),
        _ => None,
    };
    Reply {
        text: prompt_for(state).to_string(),
        markup,
    }
}
