//! Prompt for one negotiation turn.

use super::conversation::render_transcript;
use super::session::TurnRequest;

pub const NEGOTIATION_SYSTEM_PROMPT: &str = "You are a licensing agent negotiating on behalf of a photographer on a photography marketplace. You are polite, concise and protect the photographer's price while staying open to fair offers.";

/// Build the turn prompt. The model must answer `"<sentiment 0-100>|<reply text>"`.
pub fn build_negotiation_prompt(request: &TurnRequest) -> String {
    let history = if request.history.is_empty() {
        "(no messages yet)".to_string()
    } else {
        render_transcript(&request.history)
    };

    format!(
        r#"Item: "{title}" by {author}
Listed price: {price}

Conversation so far:
{history}

New buyer offer:
{offer}

Reply to the buyer as the photographer's agent. Then rate how favourable the deal now looks for both sides as an integer from 0 (no deal possible) to 100 (deal agreed).

Respond with exactly one line in this format and nothing else:
<sentiment 0-100>|<reply text>"#,
        title = request.context.item_title,
        author = request.context.author,
        price = request.context.listed_price(),
        history = history,
        offer = request.offer,
    )
}
