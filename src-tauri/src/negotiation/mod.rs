//! Negotiation dialog back end: transcript, turn state machine, model turn.

pub mod conversation;
pub mod processor;
pub mod prompts;
pub mod reply;
pub mod session;

pub use conversation::{ConversationState, Message, NegotiationContext, Role};
pub use processor::{NegotiationSessions, NegotiationTurnProcessor, TurnOutcome};
pub use reply::{parse_reply, AgentReply};
pub use session::{ConversationSnapshot, NegotiationSession, TurnState};
