//! Parsing of the agent's "<sentiment>|<reply>" answer.

use serde::{Deserialize, Serialize};

use super::conversation::DEFAULT_SENTIMENT;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentReply {
    pub sentiment: u8,
    pub message: String,
}

/// Split on the first `|`. The left side is the sentiment (leading integer
/// part, clamped to 0-100, 50 when unreadable); the rest is the message. Without a `|` the
/// whole text is the message.
pub fn parse_reply(text: &str) -> AgentReply {
    let trimmed = text.trim();
    match trimmed.split_once('|') {
        Some((score, message)) => AgentReply {
            sentiment: parse_sentiment(score).unwrap_or(DEFAULT_SENTIMENT),
            message: message.trim().to_string(),
        },
        None => AgentReply {
            sentiment: DEFAULT_SENTIMENT,
            message: trimmed.to_string(),
        },
    }
}

fn parse_sentiment(score: &str) -> Option<u8> {
    let score = score.trim();
    let value = match score.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            let f = score.parse::<f64>().ok().filter(|f| f.is_finite())?;
            f.trunc() as i64
        }
    };
    Some(value.clamp(0, 100) as u8)
}
