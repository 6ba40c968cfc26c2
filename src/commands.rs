use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| "Unknown error".to_string())
}

/// Invoke a command and deserialize its result.
async fn call<A: Serialize, T: DeserializeOwned>(cmd: &str, args: &A) -> Result<T, String> {
    let args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    let result = invoke(cmd, args).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

/// Invoke a command whose result is ignored.
async fn call_unit<A: Serialize>(cmd: &str, args: &A) -> Result<(), String> {
    let args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    invoke(cmd, args).await.map(|_| ()).map_err(js_error)
}

// -- Arg structs for serialization --

#[derive(Serialize)]
struct ServiceArgs<'a> {
    service: &'a str,
}

#[derive(Serialize)]
struct SetApiKeyArgs<'a> {
    service: &'a str,
    key: &'a str,
}

#[derive(Serialize)]
struct GetPreferenceArgs<'a> {
    key: &'a str,
}

#[derive(Serialize)]
struct SetPreferenceArgs<'a> {
    key: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
struct ListModelsArgs<'a> {
    provider: &'a str,
}

#[derive(Serialize)]
struct NoArgs {}

// -- Settings types matching backend structs --

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderKeyStatus {
    pub provider: String,
    pub service: String,
    pub configured: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AiStatus {
    pub provider: String,
    pub model: String,
    pub keys: Vec<ProviderKeyStatus>,
}

// -- Style types --

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EditingInstructions {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub warmth: f32,
    pub grain: f32,
    pub sepia: f32,
    pub hue_rotate: f32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StyleProfile {
    pub id: String,
    pub name: String,
    pub description: String,
    pub instructions: EditingInstructions,
    /// RFC 3339 timestamp.
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FilterPreview {
    pub css: String,
    pub instructions: EditingInstructions,
}

#[derive(Debug, Clone, Serialize)]
pub struct PairPayload {
    pub raw_base64: String,
    pub edited_base64: String,
}

#[derive(Serialize)]
struct AnalyzeStyleRequest {
    pairs: Vec<PairPayload>,
    name: Option<String>,
}

#[derive(Serialize)]
struct AnalyzeStyleArgs {
    request: AnalyzeStyleRequest,
}

#[derive(Serialize)]
struct RenderStyleRequest<'a> {
    image_base64: &'a str,
    instructions: &'a EditingInstructions,
}

#[derive(Serialize)]
struct RenderStyleArgs<'a> {
    request: RenderStyleRequest<'a>,
}

#[derive(Serialize)]
struct FilterPreviewArgs<'a> {
    instructions: &'a EditingInstructions,
}

// -- Negotiation types --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Agent,
    User,
    System,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NegotiationContext {
    pub item_title: String,
    pub author: String,
    pub base_price: u64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConversationSnapshot {
    pub session_id: String,
    pub context: NegotiationContext,
    pub messages: Vec<Message>,
    pub deal_sentiment: u8,
    pub awaiting_response: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AgentReply {
    pub sentiment: u8,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnOutcome {
    Replied { reply: AgentReply },
    Dropped,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TurnResponse {
    pub outcome: TurnOutcome,
    pub snapshot: ConversationSnapshot,
}

#[derive(Serialize)]
struct OpenNegotiationArgs<'a> {
    context: &'a NegotiationContext,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitOfferArgs<'a> {
    session_id: &'a str,
    offer: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionArgs<'a> {
    session_id: &'a str,
}

// -- Typed invoke helpers --

pub async fn set_api_key(service: &str, key: &str) -> Result<(), String> {
    call_unit("set_api_key", &SetApiKeyArgs { service, key }).await
}

pub async fn get_api_key(service: &str) -> Result<Option<String>, String> {
    call("get_api_key", &ServiceArgs { service }).await
}

pub async fn delete_api_key(service: &str) -> Result<(), String> {
    call_unit("delete_api_key", &ServiceArgs { service }).await
}

pub async fn get_preference(key: &str) -> Result<Option<String>, String> {
    call("get_preference", &GetPreferenceArgs { key }).await
}

pub async fn set_preference(key: &str, value: &str) -> Result<(), String> {
    call_unit("set_preference", &SetPreferenceArgs { key, value }).await
}

pub async fn list_models(provider: &str) -> Result<Vec<ModelInfo>, String> {
    call("list_models", &ListModelsArgs { provider }).await
}

pub async fn get_ai_status() -> Result<AiStatus, String> {
    call("get_ai_status", &NoArgs {}).await
}

pub async fn analyze_style(
    pairs: Vec<PairPayload>,
    name: Option<String>,
) -> Result<StyleProfile, String> {
    call(
        "analyze_style",
        &AnalyzeStyleArgs {
            request: AnalyzeStyleRequest { pairs, name },
        },
    )
    .await
}

/// Returns the rendered image as PNG base64.
pub async fn render_style(
    image_base64: &str,
    instructions: &EditingInstructions,
) -> Result<String, String> {
    call(
        "render_style",
        &RenderStyleArgs {
            request: RenderStyleRequest {
                image_base64,
                instructions,
            },
        },
    )
    .await
}

pub async fn filter_preview(instructions: &EditingInstructions) -> Result<FilterPreview, String> {
    call("filter_preview", &FilterPreviewArgs { instructions }).await
}

pub async fn open_negotiation(context: &NegotiationContext) -> Result<ConversationSnapshot, String> {
    call("open_negotiation", &OpenNegotiationArgs { context }).await
}

pub async fn submit_offer(session_id: &str, offer: &str) -> Result<TurnResponse, String> {
    call("submit_offer", &SubmitOfferArgs { session_id, offer }).await
}

pub async fn close_negotiation(session_id: &str) -> Result<bool, String> {
    call("close_negotiation", &SessionArgs { session_id }).await
}
