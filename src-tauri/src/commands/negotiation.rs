//! Tauri commands for the negotiation dialog.

use serde::Serialize;
use tauri::State;
use tracing::info;

use super::config::model_client;
use crate::error::NegotiationError;
use crate::negotiation::{
    ConversationSnapshot, NegotiationContext, NegotiationSessions, NegotiationTurnProcessor,
    TurnOutcome,
};

#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub outcome: TurnOutcome,
    pub snapshot: ConversationSnapshot,
}

#[tauri::command]
pub fn open_negotiation(
    sessions: State<'_, NegotiationSessions>,
    context: NegotiationContext,
) -> ConversationSnapshot {
    sessions.open(context)
}

#[tauri::command]
pub async fn submit_offer(
    app: tauri::AppHandle,
    sessions: State<'_, NegotiationSessions>,
    session_id: String,
    offer: String,
) -> Result<TurnResponse, String> {
    let session = sessions.get(&session_id)?;
    let client = model_client(&app).map_err(NegotiationError::LinkUnstable)?;

    let outcome = NegotiationTurnProcessor::new(&client)
        .submit(&session, &offer)
        .await?;
    if outcome == TurnOutcome::Dropped {
        info!("Session {}: offer dropped", session_id);
    }

    Ok(TurnResponse {
        outcome,
        snapshot: sessions.snapshot(&session_id)?,
    })
}

#[tauri::command]
pub fn close_negotiation(sessions: State<'_, NegotiationSessions>, session_id: String) -> bool {
    sessions.close(&session_id)
}
