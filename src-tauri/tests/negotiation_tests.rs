use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use darkroom_tauri::ai::{GenerationRequest, GenerativeModel};
use darkroom_tauri::error::{ModelError, NegotiationError};
use darkroom_tauri::negotiation::{
    NegotiationContext, NegotiationSession, NegotiationSessions, NegotiationTurnProcessor, Role,
    TurnOutcome, TurnState,
};

/// Holds every reply until released, so a second submit can race the first.
struct GatedModel {
    gate: Notify,
    reply: String,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl GatedModel {
    fn new(reply: &str) -> Self {
        Self {
            gate: Notify::new(),
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl GenerativeModel for GatedModel {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt);
        self.gate.notified().await;
        Ok(self.reply.clone())
    }
}

struct DownModel;

#[async_trait]
impl GenerativeModel for DownModel {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, ModelError> {
        Err(ModelError::Timeout {
            provider: "fake".to_string(),
            seconds: 60,
        })
    }
}

fn listing() -> NegotiationContext {
    NegotiationContext {
        item_title: "Maasai Mara at First Light".to_string(),
        author: "W. Njeri".to_string(),
        base_price: 25_000,
        currency: "KES".to_string(),
    }
}

#[tokio::test]
async fn test_concurrent_offers_reach_the_model_once() {
    let model = GatedModel::new("64|I can do KES 21,000 for a single-use licence.");
    let session = Mutex::new(NegotiationSession::new("race", listing()));
    let processor = NegotiationTurnProcessor::new(&model);

    let (first, second, _) = tokio::join!(
        processor.submit(&session, "How about 18,000?"),
        processor.submit(&session, "Or 19,000?"),
        async { model.gate.notify_one() },
    );

    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    assert!(matches!(first.unwrap(), TurnOutcome::Replied { .. }));
    assert_eq!(second.unwrap(), TurnOutcome::Dropped);

    let guard = session.lock().unwrap();
    let messages = guard.conversation().messages();
    let user_offers: Vec<&str> = messages
        .iter()
        .filter(|m| m.role == Role::User)
        .map(|m| m.text.as_str())
        .collect();
    assert_eq!(user_offers, vec!["How about 18,000?"]);
    assert_eq!(messages.last().unwrap().role, Role::Agent);
    assert_eq!(guard.conversation().deal_sentiment(), 64);
    assert_eq!(guard.state(), TurnState::Idle);
}

#[tokio::test]
async fn test_prompt_carries_listing_and_history() {
    let model = GatedModel::new("40|That is well below the listed price.");
    model.gate.notify_one();
    let session = Mutex::new(NegotiationSession::new("prompt", listing()));

    NegotiationTurnProcessor::new(&model)
        .submit(&session, "10,000")
        .await
        .unwrap();

    let prompts = model.prompts.lock().unwrap();
    assert!(prompts[0].contains("Maasai Mara at First Light"));
    assert!(prompts[0].contains("KES 25,000"));
    assert!(prompts[0].contains("10,000"));
}

#[tokio::test]
async fn test_failed_turn_leaves_session_usable() {
    let session = Mutex::new(NegotiationSession::new("flaky", listing()));
    let before = session.lock().unwrap().snapshot();

    let err = NegotiationTurnProcessor::new(&DownModel)
        .submit(&session, "20,000")
        .await
        .unwrap_err();
    match err {
        NegotiationError::LinkUnstable(msg) => assert!(msg.contains("timeout")),
        other => panic!("expected LinkUnstable, got {:?}", other),
    }
    assert_eq!(session.lock().unwrap().snapshot(), before);

    let model = GatedModel::new("75|Meet me at 22,000.");
    model.gate.notify_one();
    let outcome = NegotiationTurnProcessor::new(&model)
        .submit(&session, "20,000")
        .await
        .unwrap();
    assert!(matches!(outcome, TurnOutcome::Replied { .. }));
    assert_eq!(session.lock().unwrap().conversation().deal_sentiment(), 75);
}

#[tokio::test]
async fn test_sessions_do_not_share_state() {
    let sessions = NegotiationSessions::new();
    let a = sessions.open(listing());
    let b = sessions.open(listing());

    let model = GatedModel::new("90|Deal.");
    model.gate.notify_one();
    let session_a = sessions.get(&a.session_id).unwrap();
    NegotiationTurnProcessor::new(&model)
        .submit(&session_a, "24,000")
        .await
        .unwrap();

    let snap_a = sessions.snapshot(&a.session_id).unwrap();
    let snap_b = sessions.snapshot(&b.session_id).unwrap();
    assert_eq!(snap_a.deal_sentiment, 90);
    assert_eq!(snap_b.deal_sentiment, 50);
    assert_eq!(snap_b.messages, b.messages);
}
