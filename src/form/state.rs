//! Form state machine.
//!
//! The request form is a strict linear walk over five fields. The
//! transition function is pure and knows nothing about Telegram; the
//! collector owns the session store and applies the side effects.

use crate::form::prompts::ENTRY_BUTTON_LABEL;

/// One of the five collected form fields, in walk order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Cargo,
    Dimensions,
    Route,
    Contact,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Cargo => "cargo",
            Self::Dimensions => "dimensions",
            Self::Route => "route",
            Self::Contact => "contact",
        }
    }
}

/// State of an active form session. Idle is represented by the
/// session's absence from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    AwaitingName,
    AwaitingCargo,
    AwaitingDimensions,
    AwaitingRoute,
    AwaitingContact,
}

impl FormState {
    /// The field this state collects.
    pub fn field(&self) -> Field {
        match self {
            Self::AwaitingName => Field::Name,
            Self::AwaitingCargo => Field::Cargo,
            Self::AwaitingDimensions => Field::Dimensions,
            Self::AwaitingRoute => Field::Route,
            Self::AwaitingContact => Field::Contact,
        }
    }

    /// The state that follows this one, or `None` from the final state.
    pub fn next(&self) -> Option<FormState> {
        match self {
            Self::AwaitingName => Some(Self::AwaitingCargo),
            Self::AwaitingCargo => Some(Self::AwaitingDimensions),
            Self::AwaitingDimensions => Some(Self::AwaitingRoute),
            Self::AwaitingRoute => Some(Self::AwaitingContact),
            Self::AwaitingContact => None,
        }
    }
}

/// Classified shape of an inbound text message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormInput {
    /// `/start`.
    Start,
    /// `/cancel`.
    Cancel,
    /// Any other slash command.
    OtherCommand,
    /// The fixed entry-button label.
    EntryButton,
    /// Plain text (a field answer).
    Text,
}

/// Classify a message text. Commands are the first whitespace-delimited
/// token, with an optional `@botname` suffix (group chat form).
pub fn classify(text: &str) -> FormInput {
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix('/') {
        let command = rest.split_whitespace().next().unwrap_or("");
        let command = command.split('@').next().unwrap_or(command);
        return match command {
            "start" => FormInput::Start,
            "cancel" => FormInput::Cancel,
            _ => FormInput::OtherCommand,
        };
    }
    if trimmed == ENTRY_BUTTON_LABEL {
        FormInput::EntryButton
    } else {
        FormInput::Text
    }
}

/// Outcome of applying one input to one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// No session change, no reply.
    Ignored,
    /// Idle entered the flow: create a session in `AwaitingName` and
    /// send the greeting.
    Entered,
    /// An active session was cancelled: drop it and acknowledge.
    Cancelled,
    /// A non-final answer: store it under `field`, move to `next`.
    Advanced { field: Field, next: FormState },
    /// The final answer: store it under `field`, dispatch, acknowledge,
    /// drop the session.
    Completed { field: Field },
}

/// The transition table. `state` is `None` for Idle.
pub fn transition(state: Option<FormState>, input: FormInput) -> Transition {
    match (state, input) {
        // Entry triggers, from Idle only.
        (None, FormInput::Start | FormInput::EntryButton) => Transition::Entered,
        // Everything else outside a session matches no handler.
        (None, _) => Transition::Ignored,

        (Some(_), FormInput::Cancel) => Transition::Cancelled,
        // No re-entry and no command handling while a form is active.
        (Some(_), FormInput::Start | FormInput::OtherCommand) => Transition::Ignored,

        // The button label arriving mid-form is an ordinary answer.
        (Some(state), FormInput::EntryButton | FormInput::Text) => match state.next() {
            Some(next) => Transition::Advanced {
                field: state.field(),
                next,
            },
            None => Transition::Completed {
                field: state.field(),
            },
        },
    }
}
