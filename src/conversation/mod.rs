//! Conversation state for the chat panel.
//!
//! - `store` - the message log and the ask/summary request state machine
//! - `session` - the store behind a mutex, driven on a tokio runtime

mod session;
mod store;

pub use session::ChatSession;
pub use store::{AskTicket, ConversationStore, RequestState, RequestToken, SummaryTicket};
