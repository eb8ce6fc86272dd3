//! Contracts consumed from the host session.
//!
//! The host owns the participant registry, the network channel, the document,
//! the retained-mode text primitive and the chat command entry point. Veneer
//! only reads or wraps them, so each is an injected trait object.

use crate::types::{NodeId, Participant, ParticipantId, TextObject};

/// Authoritative id -> identity mapping.
pub trait ParticipantRegistry: Send + Sync {
    /// All participants, in stable host order.
    fn participants(&self) -> Vec<(ParticipantId, Participant)>;

    fn get(&self, id: &ParticipantId) -> Option<Participant> {
        self.participants()
            .into_iter()
            .find(|(pid, _)| pid == id)
            .map(|(_, p)| p)
    }

    /// Id of the participant this client plays as.
    fn local_id(&self) -> ParticipantId;
}

/// Best-effort broadcast channel shared with unrelated traffic.
pub trait Transport: Send + Sync {
    fn send(&self, payload: String);
}

/// Local-only chat output.
pub trait ChatSink: Send + Sync {
    fn display(&self, text: &str, primary: &str, secondary: &str);
}

/// Live, queryable document tree.
pub trait Document: Send + Sync {
    /// Nodes matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<NodeId>;

    fn text(&self, node: NodeId) -> Option<String>;

    fn set_text(&self, node: NodeId, text: &str);

    fn is_connected(&self, node: NodeId) -> bool;

    fn set_style(&self, node: NodeId, property: &str, value: &str);
}

/// The host's lowest-level text draw primitive.
pub trait TextRenderer: Send + Sync {
    type Output;

    fn update_text(&self, object: &mut TextObject) -> Self::Output;
}

/// The host's chat command entry point. An empty reply means "handled".
pub trait CommandHandler: Send + Sync {
    fn handle(&self, line: &str) -> String;
}

impl<F> CommandHandler for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn handle(&self, line: &str) -> String {
        self(line)
    }
}
