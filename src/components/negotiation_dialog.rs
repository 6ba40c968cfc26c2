//! Modal licensing negotiation with the photographer's agent.
//!
//! Each dialog owns its own back-end session and in-flight flag; nothing is
//! shared between dialogs.

use std::sync::{Arc, Mutex};

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, ConversationSnapshot, NegotiationContext, Role, TurnOutcome};
use crate::context::Toasts;

fn sentiment_class(sentiment: u8) -> &'static str {
    match sentiment {
        0..=34 => "sentiment-fill sentiment-cold",
        35..=69 => "sentiment-fill sentiment-warm",
        _ => "sentiment-fill sentiment-hot",
    }
}

fn bubble_class(role: Role) -> &'static str {
    match role {
        Role::Agent => "bubble bubble-agent",
        Role::User => "bubble bubble-user",
        Role::System => "bubble bubble-system",
    }
}

/// Back-end session state for one dialog. Whoever observes the transition to
/// `Closed` from `Open` gets the id and is responsible for closing it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum DialogSession {
    #[default]
    Opening,
    Open(String),
    Closed,
}

impl DialogSession {
    /// Record a session that finished opening. Returns the id back when the
    /// dialog was already dismissed, so the caller closes it right away.
    fn opened(&mut self, session_id: String) -> Option<String> {
        match self {
            DialogSession::Closed => Some(session_id),
            _ => {
                *self = DialogSession::Open(session_id);
                None
            }
        }
    }

    fn close(&mut self) -> Option<String> {
        match std::mem::replace(self, DialogSession::Closed) {
            DialogSession::Open(id) => Some(id),
            _ => None,
        }
    }
}

type SharedSession = Arc<Mutex<DialogSession>>;

fn close_session(session: &SharedSession) {
    let id = session.lock().unwrap_or_else(|p| p.into_inner()).close();
    if let Some(id) = id {
        spawn_local(async move {
            let _ = commands::close_negotiation(&id).await;
        });
    }
}

#[component]
pub fn NegotiationDialog(context: NegotiationContext, on_close: Callback<()>) -> impl IntoView {
    let toasts = expect_context::<Toasts>();
    let (snapshot, set_snapshot) = signal::<Option<ConversationSnapshot>>(None);
    let (open_error, set_open_error) = signal::<Option<String>>(None);
    let (offer, set_offer) = signal(String::new());
    let (pending_offer, set_pending_offer) = signal::<Option<String>>(None);

    let title = context.item_title.clone();
    let author = context.author.clone();

    let session: SharedSession = Arc::default();

    // Open a fresh session for this dialog instance
    let ctx = StoredValue::new(context);
    let opening = session.clone();
    Effect::new(move |_| {
        let context = ctx.get_value();
        let session = opening.clone();
        spawn_local(async move {
            match commands::open_negotiation(&context).await {
                Ok(snap) => {
                    let late = session
                        .lock()
                        .unwrap_or_else(|p| p.into_inner())
                        .opened(snap.session_id.clone());
                    match late {
                        Some(id) => {
                            let _ = commands::close_negotiation(&id).await;
                        }
                        None => set_snapshot.set(Some(snap)),
                    }
                }
                Err(e) => set_open_error.set(Some(e)),
            }
        });
    });

    // Unmounting (tab switch, route change) ends the session too
    let on_unmount = session.clone();
    on_cleanup(move || close_session(&on_unmount));

    let awaiting = move || pending_offer.get().is_some();

    let submit = move || {
        let text = offer.get().trim().to_string();
        if text.is_empty() || pending_offer.get_untracked().is_some() {
            return;
        }
        let Some(session_id) = snapshot.get_untracked().map(|s| s.session_id) else {
            return;
        };
        set_pending_offer.set(Some(text.clone()));
        set_offer.set(String::new());

        spawn_local(async move {
            match commands::submit_offer(&session_id, &text).await {
                Ok(response) => {
                    if response.outcome == TurnOutcome::Dropped {
                        set_offer.set(text);
                    }
                    set_snapshot.set(Some(response.snapshot));
                }
                Err(e) => {
                    web_sys::console::warn_1(&e.clone().into());
                    toasts.error("Negotiation link unstable");
                    // Give the offer back so it can be resent
                    set_offer.set(text);
                }
            }
            set_pending_offer.set(None);
        });
    };

    let close = move |_| {
        close_session(&session);
        on_close.run(());
    };

    view! {
        <div class="modal-backdrop">
            <div class="modal negotiation-dialog" role="dialog" aria-modal="true">
                <header class="modal-header">
                    <div>
                        <h3>{title}</h3>
                        <p class="modal-subtitle">"by " {author}</p>
                    </div>
                    <button class="btn btn-secondary" on:click=close>"Close"</button>
                </header>

                {move || open_error.get().map(|e| view! {
                    <div class="error-message">"Could not open negotiation: " {e}</div>
                })}

                {move || snapshot.get().map(|snap| {
                    let sentiment = snap.deal_sentiment;
                    view! {
                        <div class="sentiment-meter" title="Deal sentiment">
                            <span class="sentiment-label">"Deal sentiment " {sentiment} "%"</span>
                            <div class="sentiment-track">
                                <div
                                    class=sentiment_class(sentiment)
                                    style:width=format!("{}%", sentiment)
                                ></div>
                            </div>
                        </div>
                        <div class="transcript">
                            {snap.messages.into_iter().map(|m| view! {
                                <div class=bubble_class(m.role)>{m.text}</div>
                            }).collect_view()}
                            {move || pending_offer.get().map(|text| view! {
                                <div class="bubble bubble-user bubble-pending">{text}</div>
                                <div class="typing-indicator">"Agent is typing..."</div>
                            })}
                        </div>
                    }
                })}

                <form
                    class="offer-form"
                    on:submit=move |ev: web_sys::SubmitEvent| {
                        ev.prevent_default();
                        submit();
                    }
                >
                    <input
                        type="text"
                        class="input"
                        placeholder="Make an offer, e.g. KES 18,000 for web use"
                        prop:value=move || offer.get()
                        on:input=move |ev| set_offer.set(event_target_value(&ev))
                        disabled=move || awaiting() || snapshot.get().is_none()
                    />
                    <button
                        type="submit"
                        class="btn btn-primary"
                        disabled=move || {
                            awaiting() || snapshot.get().is_none() || offer.get().trim().is_empty()
                        }
                    >
                        "Send"
                    </button>
                </form>
            </div>
        </div>
    }
}
