//! Gossip protocol - cosmetic state over the host's shared transport
//!
//! Outbound is fire-and-forget. Inbound payloads that are not ours, or are
//! malformed, are dropped quietly: the channel carries unrelated traffic.
//! A cosmetic announcement overwrites the sender's record unconditionally;
//! there are no sequence numbers, so whatever arrives last wins.

use crate::context::OverlayContext;
use crate::store::RemoteOverride;
use std::sync::Arc;
use tracing::{debug, info, warn};
use veneer_core::{rank_label, GossipEnvelope, ParticipantId, Transport};

/// What an inbound payload turned out to be.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inbound {
    /// A peer's cosmetic record was stored.
    Cosmetic(ParticipantId),
    /// A private message addressed to this client.
    PrivateMessage { from: String, content: String },
    /// Not for us, not ours, or malformed.
    Ignored,
}

pub struct Gossip {
    context: Arc<OverlayContext>,
    transport: Arc<dyn Transport>,
}

impl Gossip {
    pub fn new(context: Arc<OverlayContext>, transport: Arc<dyn Transport>) -> Self {
        Self { context, transport }
    }

    /// Broadcast the local override state. While the custom name is switched
    /// off, peers get the registry name and no gradient.
    pub fn announce(&self) {
        let (id, participant) = self.context.local_participant();
        let envelope = {
            let store = self.context.store();
            let local = store.local();
            let (name, gradient) = match &local.display_name {
                Some(name) if local.name_active => (name.clone(), local.gradient.clone()),
                _ => (participant.user_name.clone(), None),
            };
            GossipEnvelope::cosmetic(id, name, local.rank_label.clone(), gradient)
        };
        self.send(&envelope);
    }

    /// Tell the channel a nickname was assigned. Informational only.
    pub fn announce_nickname(&self, target: ParticipantId, text: &str) {
        self.send(&GossipEnvelope::nickname_notice(target, text));
    }

    pub fn send_private(&self, target: ParticipantId, content: &str) {
        let sender = self.context.local_id();
        let sender_name = self.context.display_name(&sender);
        self.send(&GossipEnvelope::private_message(target, sender, sender_name, content));
    }

    fn send(&self, envelope: &GossipEnvelope) {
        match envelope.encode() {
            Ok(payload) => {
                info!("Broadcasting {}", envelope.kind());
                self.transport.send(payload);
            }
            Err(e) => warn!("Failed to encode {}: {}", envelope.kind(), e),
        }
    }

    /// Apply one payload from the transport.
    pub fn receive(&self, raw: &str) -> Inbound {
        let envelope = match GossipEnvelope::decode(raw) {
            Ok(e) => e,
            Err(e) => {
                debug!("Ignoring transport payload: {}", e);
                return Inbound::Ignored;
            }
        };

        match envelope {
            GossipEnvelope::Cosmetic {
                sender_id: Some(sender),
                name,
                rank,
                gradient,
            } => {
                let name = name.filter(|n| !n.is_empty()).unwrap_or_else(|| {
                    self.context
                        .registry()
                        .get(&sender)
                        .map(|p| p.user_name)
                        .filter(|n| !n.is_empty())
                        .unwrap_or_else(|| "Guest".to_string())
                });
                let record = RemoteOverride {
                    name,
                    rank_label: rank.filter(|r| !r.is_empty()).unwrap_or_else(|| rank_label(1)),
                    gradient,
                };
                match self.context.store_mut().apply_remote(sender.clone(), record) {
                    Ok(()) => {
                        debug!("Stored cosmetic record for {}", sender);
                        Inbound::Cosmetic(sender)
                    }
                    Err(e) => {
                        debug!("Dropping cosmetic record: {}", e);
                        Inbound::Ignored
                    }
                }
            }
            GossipEnvelope::Cosmetic { sender_id: None, .. } => {
                debug!("Dropping cosmetic record without sender");
                Inbound::Ignored
            }
            GossipEnvelope::NicknameNotice { target_id, text } => {
                debug!("Peer nicknamed {} as {:?}", target_id, text);
                Inbound::Ignored
            }
            GossipEnvelope::PrivateMessage {
                target_id,
                sender_name,
                content,
                ..
            } => {
                if target_id == self.context.local_id() {
                    Inbound::PrivateMessage {
                        from: sender_name,
                        content,
                    }
                } else {
                    Inbound::Ignored
                }
            }
        }
    }
}
