//! Drives one negotiation turn against the remote model.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use super::conversation::NegotiationContext;
use super::prompts::{build_negotiation_prompt, NEGOTIATION_SYSTEM_PROMPT};
use super::reply::AgentReply;
use super::session::{ConversationSnapshot, NegotiationSession};
use crate::ai::{GenerationRequest, GenerativeModel};
use crate::error::NegotiationError;

/// Replies are a single short line.
const TURN_MAX_TOKENS: u32 = 512;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnOutcome {
    Replied { reply: AgentReply },
    /// The offer was blank or another turn was in flight; nothing was sent.
    Dropped,
}

pub struct NegotiationTurnProcessor<'a> {
    model: &'a dyn GenerativeModel,
}

impl<'a> NegotiationTurnProcessor<'a> {
    pub fn new(model: &'a dyn GenerativeModel) -> Self {
        Self { model }
    }

    /// Submit an offer for `session`.
    ///
    /// The session lock is only held to begin and to complete the turn, so a
    /// concurrent submit observes `AwaitingResponse` and is dropped without
    /// reaching the model.
    pub async fn submit(
        &self,
        session: &Mutex<NegotiationSession>,
        offer: &str,
    ) -> Result<TurnOutcome, NegotiationError> {
        let (session_id, request) = {
            let mut guard = lock(session);
            match guard.begin_turn(offer) {
                Some(request) => (guard.id().to_string(), request),
                None => return Ok(TurnOutcome::Dropped),
            }
        };

        info!("Session {}: sending offer to model", session_id);
        let generation = GenerationRequest {
            max_tokens: TURN_MAX_TOKENS,
            ..GenerationRequest::new(build_negotiation_prompt(&request))
                .with_system(NEGOTIATION_SYSTEM_PROMPT)
        };
        let result = self.model.generate(generation).await.map_err(|e| {
            error!("Session {}: negotiation call failed: {}", session_id, e);
            NegotiationError::from(e)
        });

        let mut guard = lock(session);
        guard
            .complete_turn(result)
            .map(|reply| TurnOutcome::Replied { reply })
    }
}

fn lock(session: &Mutex<NegotiationSession>) -> MutexGuard<'_, NegotiationSession> {
    session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Open negotiation dialogs, one isolated session each.
#[derive(Debug, Default)]
pub struct NegotiationSessions {
    sessions: Mutex<HashMap<String, Arc<Mutex<NegotiationSession>>>>,
}

impl NegotiationSessions {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self) -> MutexGuard<'_, HashMap<String, Arc<Mutex<NegotiationSession>>>> {
        self.sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn open(&self, context: NegotiationContext) -> ConversationSnapshot {
        let id = Uuid::new_v4().to_string();
        let session = NegotiationSession::new(id.clone(), context);
        let snapshot = session.snapshot();
        self.map().insert(id.clone(), Arc::new(Mutex::new(session)));
        info!("Opened negotiation session {}", id);
        snapshot
    }

    pub fn get(&self, id: &str) -> Result<Arc<Mutex<NegotiationSession>>, NegotiationError> {
        self.map()
            .get(id)
            .cloned()
            .ok_or_else(|| NegotiationError::UnknownSession(id.to_string()))
    }

    pub fn snapshot(&self, id: &str) -> Result<ConversationSnapshot, NegotiationError> {
        let session = self.get(id)?;
        let snapshot = lock(&session).snapshot();
        Ok(snapshot)
    }

    pub fn close(&self, id: &str) -> bool {
        let removed = self.map().remove(id).is_some();
        if removed {
            info!("Closed negotiation session {}", id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::negotiation::session::TurnState;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedModel {
        reply: Result<String, ()>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GenerativeModel for ScriptedModel {
        async fn generate(&self, _request: GenerationRequest) -> Result<String, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().map_err(|_| ModelError::Http {
                provider: "test".to_string(),
                status: 503,
                body: "unavailable".to_string(),
            })
        }
    }

    fn context() -> NegotiationContext {
        NegotiationContext {
            item_title: "Rift Valley Storm".to_string(),
            author: "K. Achieng".to_string(),
            base_price: 22_000,
            currency: "KES".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_replies_and_updates_sentiment() {
        let model = ScriptedModel {
            reply: Ok("82|Deal. KES 18,000 works.".to_string()),
            calls: AtomicUsize::new(0),
        };
        let session = Mutex::new(NegotiationSession::new("s", context()));
        let outcome = NegotiationTurnProcessor::new(&model)
            .submit(&session, "18,000?")
            .await
            .unwrap();

        assert_eq!(
            outcome,
            TurnOutcome::Replied {
                reply: AgentReply {
                    sentiment: 82,
                    message: "Deal. KES 18,000 works.".to_string()
                }
            }
        );
        let guard = session.lock().unwrap();
        assert_eq!(guard.conversation().deal_sentiment(), 82);
        assert_eq!(guard.state(), TurnState::Idle);
    }

    #[tokio::test]
    async fn test_blank_offer_never_calls_model() {
        let model = ScriptedModel {
            reply: Ok("50|hi".to_string()),
            calls: AtomicUsize::new(0),
        };
        let session = Mutex::new(NegotiationSession::new("s", context()));
        let outcome = NegotiationTurnProcessor::new(&model)
            .submit(&session, "  ")
            .await
            .unwrap();
        assert_eq!(outcome, TurnOutcome::Dropped);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_is_link_unstable_and_transcript_unchanged() {
        let model = ScriptedModel {
            reply: Err(()),
            calls: AtomicUsize::new(0),
        };
        let session = Mutex::new(NegotiationSession::new("s", context()));
        let before = session.lock().unwrap().conversation().clone();

        let err = NegotiationTurnProcessor::new(&model)
            .submit(&session, "15,000")
            .await
            .unwrap_err();

        assert!(matches!(err, NegotiationError::LinkUnstable(_)));
        let guard = session.lock().unwrap();
        assert_eq!(guard.conversation(), &before);
        assert_eq!(guard.state(), TurnState::Idle);
    }

    #[test]
    fn test_sessions_are_isolated_and_closable() {
        let sessions = NegotiationSessions::new();
        let a = sessions.open(context());
        let b = sessions.open(context());
        assert_ne!(a.session_id, b.session_id);
        assert_eq!(sessions.len(), 2);

        sessions
            .get(&a.session_id)
            .unwrap()
            .lock()
            .unwrap()
            .begin_turn("10,000");
        assert!(sessions.snapshot(&a.session_id).unwrap().awaiting_response);
        assert!(!sessions.snapshot(&b.session_id).unwrap().awaiting_response);

        assert!(sessions.close(&a.session_id));
        assert!(!sessions.close(&a.session_id));
        assert!(matches!(
            sessions.get(&a.session_id),
            Err(NegotiationError::UnknownSession(_))
        ));
    }
}
