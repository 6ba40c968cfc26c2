//! Per-dialog negotiation state machine: `Idle -> AwaitingResponse -> Idle`.

use serde::Serialize;
use tracing::{info, warn};

use super::conversation::{ConversationState, Message, NegotiationContext, Role};
use super::reply::{parse_reply, AgentReply};
use crate::error::NegotiationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    Idle,
    AwaitingResponse,
}

/// Everything the model needs for one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnRequest {
    pub context: NegotiationContext,
    /// Messages before the new offer.
    pub history: Vec<Message>,
    pub offer: String,
}

/// Serializable view of a session for the front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationSnapshot {
    pub session_id: String,
    pub context: NegotiationContext,
    pub messages: Vec<Message>,
    pub deal_sentiment: u8,
    pub awaiting_response: bool,
}

#[derive(Debug)]
pub struct NegotiationSession {
    id: String,
    context: NegotiationContext,
    conversation: ConversationState,
    state: TurnState,
    // Transcript length before the in-flight offer was appended.
    committed_len: usize,
}

impl NegotiationSession {
    pub fn new(id: impl Into<String>, context: NegotiationContext) -> Self {
        let conversation = ConversationState::opened_for(&context);
        let committed_len = conversation.len();
        Self {
            id: id.into(),
            context,
            conversation,
            state: TurnState::Idle,
            committed_len,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    /// Start a turn. Returns `None` (and changes nothing) for blank offers
    /// or while a response is outstanding; such submissions are dropped,
    /// not queued.
    pub fn begin_turn(&mut self, offer: &str) -> Option<TurnRequest> {
        let offer = offer.trim();
        if offer.is_empty() {
            return None;
        }
        if self.state == TurnState::AwaitingResponse {
            warn!("Session {}: dropping offer while awaiting response", self.id);
            return None;
        }

        let history = self.conversation.messages().to_vec();
        self.committed_len = self.conversation.len();
        self.conversation.push(Role::User, offer);
        self.state = TurnState::AwaitingResponse;

        Some(TurnRequest {
            context: self.context.clone(),
            history,
            offer: offer.to_string(),
        })
    }

    /// Finish the outstanding turn and return to `Idle`.
    ///
    /// On success the reply is parsed, appended as an agent message and its
    /// sentiment replaces the current one. On failure the offer is rolled
    /// back so the transcript and sentiment are exactly as before the turn.
    pub fn complete_turn(
        &mut self,
        result: Result<String, NegotiationError>,
    ) -> Result<AgentReply, NegotiationError> {
        self.state = TurnState::Idle;
        match result {
            Ok(text) => {
                let reply = parse_reply(&text);
                self.conversation.push(Role::Agent, reply.message.clone());
                self.conversation.set_sentiment(reply.sentiment);
                self.committed_len = self.conversation.len();
                info!(
                    "Session {}: agent replied, sentiment {}",
                    self.id, reply.sentiment
                );
                Ok(reply)
            }
            Err(e) => {
                self.conversation.truncate(self.committed_len);
                warn!("Session {}: turn failed, transcript restored: {}", self.id, e);
                Err(e)
            }
        }
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            session_id: self.id.clone(),
            context: self.context.clone(),
            messages: self.conversation.messages().to_vec(),
            deal_sentiment: self.conversation.deal_sentiment(),
            awaiting_response: self.state == TurnState::AwaitingResponse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> NegotiationSession {
        NegotiationSession::new(
            "s1",
            NegotiationContext {
                item_title: "Lamu Dhow".to_string(),
                author: "A. Njeri".to_string(),
                base_price: 20_000,
                currency: "KES".to_string(),
            },
        )
    }

    #[test]
    fn test_blank_offer_is_ignored() {
        let mut s = session();
        assert!(s.begin_turn("   ").is_none());
        assert_eq!(s.state(), TurnState::Idle);
        assert_eq!(s.conversation().len(), 1);
    }

    #[test]
    fn test_begin_turn_appends_offer_and_awaits() {
        let mut s = session();
        let request = s.begin_turn(" KES 15,000? ").unwrap();
        assert_eq!(request.offer, "KES 15,000?");
        assert_eq!(request.history.len(), 1);
        assert_eq!(s.state(), TurnState::AwaitingResponse);
        assert_eq!(s.conversation().messages().last().unwrap().role, Role::User);
        assert!(s.snapshot().awaiting_response);
    }

    #[test]
    fn test_second_offer_while_awaiting_is_dropped() {
        let mut s = session();
        assert!(s.begin_turn("15,000").is_some());
        assert!(s.begin_turn("16,000").is_none());
        assert_eq!(s.conversation().len(), 2);
    }

    #[test]
    fn test_successful_turn_appends_agent_and_sets_sentiment() {
        let mut s = session();
        s.begin_turn("18,000 final").unwrap();
        let reply = s
            .complete_turn(Ok("82|Deal. KES 18,000 works.".to_string()))
            .unwrap();
        assert_eq!(reply.sentiment, 82);
        assert_eq!(s.state(), TurnState::Idle);
        assert_eq!(s.conversation().deal_sentiment(), 82);
        let last = s.conversation().messages().last().unwrap();
        assert_eq!(last.role, Role::Agent);
        assert_eq!(last.text, "Deal. KES 18,000 works.");
        assert_eq!(s.conversation().len(), 3);
    }

    #[test]
    fn test_failed_turn_restores_transcript_and_returns_to_idle() {
        let mut s = session();
        s.begin_turn("10,000").unwrap();
        s.complete_turn(Ok("30|Too low.".to_string())).unwrap();
        let before = s.conversation().clone();

        s.begin_turn("12,000").unwrap();
        let err = s
            .complete_turn(Err(NegotiationError::LinkUnstable("timeout".to_string())))
            .unwrap_err();
        assert!(matches!(err, NegotiationError::LinkUnstable(_)));
        assert_eq!(s.state(), TurnState::Idle);
        assert_eq!(s.conversation(), &before);
        assert_eq!(s.conversation().deal_sentiment(), 30);

        // A new submission is possible afterwards.
        assert!(s.begin_turn("12,000").is_some());
    }
}
