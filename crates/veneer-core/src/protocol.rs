//! Gossip wire format
//!
//! Cosmetic state rides the host's shared transport as JSON, discriminated by `type`:
//!
//!   { "type": "cosmetic", "senderId": "7", "name": "Star", "rank": "Level 42",
//!     "gradient": { "colors": ["#ff4500", "#ffd700"], "periodMs": 80 } }
//!   { "type": "nickname-notice", "targetId": "3", "text": "Bob" }
//!   { "type": "private-message", "targetId": "3", "senderId": "7",
//!     "senderName": "Star", "content": "hi" }
//!
//! Older clients spell these `bonk_customizer` / `bonk_nick` / `bonk_pm`,
//! with `level`, `nickname` and `speed` field names. Both spellings decode.

use crate::error::{Error, Result};
use crate::types::{GradientSpec, ParticipantId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GossipEnvelope {
    #[serde(rename = "cosmetic", alias = "bonk_customizer")]
    Cosmetic {
        #[serde(rename = "senderId", default, skip_serializing_if = "Option::is_none")]
        sender_id: Option<ParticipantId>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default, alias = "level")]
        rank: Option<String>,
        #[serde(default)]
        gradient: Option<GradientSpec>,
    },

    #[serde(rename = "nickname-notice", alias = "bonk_nick")]
    NicknameNotice {
        #[serde(rename = "targetId")]
        target_id: ParticipantId,
        #[serde(alias = "nickname")]
        text: String,
    },

    #[serde(rename = "private-message", alias = "bonk_pm")]
    PrivateMessage {
        #[serde(rename = "targetId")]
        target_id: ParticipantId,
        #[serde(rename = "senderId")]
        sender_id: ParticipantId,
        #[serde(rename = "senderName")]
        sender_name: String,
        content: String,
    },
}

impl GossipEnvelope {
    pub fn cosmetic(
        sender_id: ParticipantId,
        name: impl Into<String>,
        rank: impl Into<String>,
        gradient: Option<GradientSpec>,
    ) -> Self {
        Self::Cosmetic {
            sender_id: Some(sender_id),
            name: Some(name.into()),
            rank: Some(rank.into()),
            gradient,
        }
    }

    pub fn nickname_notice(target_id: ParticipantId, text: impl Into<String>) -> Self {
        Self::NicknameNotice {
            target_id,
            text: text.into(),
        }
    }

    pub fn private_message(
        target_id: ParticipantId,
        sender_id: ParticipantId,
        sender_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::PrivateMessage {
            target_id,
            sender_id,
            sender_name: sender_name.into(),
            content: content.into(),
        }
    }

    /// Decode a raw transport payload. Unknown tags and malformed bodies are
    /// both `Error::Parse`; callers on the shared channel drop them.
    pub fn decode(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| Error::parse(e.to_string()))
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Cosmetic { .. } => "cosmetic",
            Self::NicknameNotice { .. } => "nickname-notice",
            Self::PrivateMessage { .. } => "private-message",
        }
    }
}
