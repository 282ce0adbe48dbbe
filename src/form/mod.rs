//! The request form: state machine, prompts, session store.

pub mod prompts;
pub mod session;
pub mod state;

pub use session::{Session, SessionStore};
pub use state::{Field, FormInput, FormState, Transition, classify, transition};
