//! Negotiation transcript and deal sentiment.

use serde::{Deserialize, Serialize};

/// Sentiment used before the first agent turn and when a reply carries no
/// readable score.
pub const DEFAULT_SENTIMENT: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Agent,
    User,
    System,
}

impl Role {
    fn transcript_label(&self) -> &'static str {
        match self {
            Role::Agent => "Agent",
            Role::User => "Buyer",
            Role::System => "System",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

/// What is being negotiated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationContext {
    pub item_title: String,
    pub author: String,
    pub base_price: u64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "KES".to_string()
}

impl NegotiationContext {
    pub fn listed_price(&self) -> String {
        format!("{} {}", self.currency, format_thousands(self.base_price))
    }
}

/// Append-only message log plus the latest deal sentiment (0-100).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    messages: Vec<Message>,
    deal_sentiment: u8,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            deal_sentiment: DEFAULT_SENTIMENT,
        }
    }
}

impl ConversationState {
    /// New conversation opened with a system greeting for `context`.
    pub fn opened_for(context: &NegotiationContext) -> Self {
        let mut state = Self::default();
        state.push(
            Role::System,
            format!(
                "Negotiation opened for \"{}\" by {}. Listed at {}.",
                context.item_title,
                context.author,
                context.listed_price()
            ),
        );
        state
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn deal_sentiment(&self) -> u8 {
        self.deal_sentiment
    }

    pub fn push(&mut self, role: Role, text: impl Into<String>) {
        self.messages.push(Message {
            role,
            text: text.into(),
        });
    }

    /// Overwrite (not accumulate) the sentiment.
    pub fn set_sentiment(&mut self, sentiment: u8) {
        self.deal_sentiment = sentiment.min(100);
    }

    /// Drop messages past `len`. Used to undo an uncommitted turn.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.messages.truncate(len);
    }

    /// Plain-text transcript for prompts, one "Label: text" line per message.
    pub fn transcript(&self) -> String {
        render_transcript(&self.messages)
    }
}

pub fn render_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role.transcript_label(), m.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 18000 -> "18,000"
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> NegotiationContext {
        NegotiationContext {
            item_title: "Maasai Mara at Dawn".to_string(),
            author: "W. Otieno".to_string(),
            base_price: 25_000,
            currency: "KES".to_string(),
        }
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(18_000), "18,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_opened_conversation_has_greeting_and_default_sentiment() {
        let state = ConversationState::opened_for(&context());
        assert_eq!(state.len(), 1);
        assert_eq!(state.messages()[0].role, Role::System);
        assert!(state.messages()[0].text.contains("KES 25,000"));
        assert_eq!(state.deal_sentiment(), DEFAULT_SENTIMENT);
    }

    #[test]
    fn test_sentiment_is_overwritten_and_capped() {
        let mut state = ConversationState::default();
        state.set_sentiment(82);
        state.set_sentiment(30);
        assert_eq!(state.deal_sentiment(), 30);
        state.set_sentiment(255);
        assert_eq!(state.deal_sentiment(), 100);
    }

    #[test]
    fn test_transcript_labels_roles() {
        let mut state = ConversationState::default();
        state.push(Role::User, "Would you take 15,000?");
        state.push(Role::Agent, "I can do 20,000.");
        assert_eq!(
            state.transcript(),
            "Buyer: Would you take 15,000?\nAgent: I can do 20,000."
        );
    }

    #[test]
    fn test_context_currency_defaults_to_kes() {
        let ctx: NegotiationContext = serde_json::from_str(
            r#"{"item_title": "t", "author": "a", "base_price": 1000}"#,
        )
        .unwrap();
        assert_eq!(ctx.listed_price(), "KES 1,000");
    }
}
