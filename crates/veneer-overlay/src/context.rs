//! Shared read/write view over the registry, the override store and the policy.

use crate::policy::{Field, Resolved, Seat, VisibilityPolicy};
use crate::store::OverrideStore;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use veneer_core::{Participant, ParticipantId, ParticipantRegistry};

pub struct OverlayContext {
    registry: Arc<dyn ParticipantRegistry>,
    store: RwLock<OverrideStore>,
    policy: VisibilityPolicy,
}

impl OverlayContext {
    pub fn new(
        registry: Arc<dyn ParticipantRegistry>,
        store: OverrideStore,
        policy: VisibilityPolicy,
    ) -> Self {
        Self {
            registry,
            store: RwLock::new(store),
            policy,
        }
    }

    pub fn registry(&self) -> &Arc<dyn ParticipantRegistry> {
        &self.registry
    }

    pub fn policy(&self) -> &VisibilityPolicy {
        &self.policy
    }

    // A panic while holding the guard cannot leave the store half-written:
    // every setter validates before it mutates.
    pub fn store(&self) -> RwLockReadGuard<'_, OverrideStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn store_mut(&self) -> RwLockWriteGuard<'_, OverrideStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn local_id(&self) -> ParticipantId {
        self.registry.local_id()
    }

    /// The local participant's registry identity, or an anonymous one if the
    /// host has not registered it yet.
    pub fn local_participant(&self) -> (ParticipantId, Participant) {
        let id = self.local_id();
        let participant = self.registry.get(&id).unwrap_or_default();
        (id, participant)
    }

    /// Resolve `field` for `subject` as seen by the local client.
    pub fn resolve_for(&self, subject: &ParticipantId, field: Field) -> Option<Resolved> {
        let participant = self.registry.get(subject)?;
        let (viewer_id, viewer) = self.local_participant();
        let store = self.store();
        Some(self.policy.resolve(
            &store,
            Seat::new(&viewer_id, &viewer),
            Seat::new(subject, &participant),
            field,
        ))
    }

    /// Display name for chat output; unknown ids fall back to `"Guest"`.
    pub fn display_name(&self, subject: &ParticipantId) -> String {
        match self.resolve_for(subject, Field::Name) {
            Some(Resolved::Text(name)) => name,
            _ => "Guest".to_string(),
        }
    }

    /// `(registry name, displayed name)` for every participant whose displayed
    /// name differs from the registry, in registry order.
    pub fn name_substitutions(&self) -> Vec<(String, String)> {
        let store = self.store();
        self.registry
            .participants()
            .into_iter()
            .filter(|(_, p)| !p.user_name.is_empty())
            .filter_map(|(id, p)| {
                let shown = self.policy.display_name(&store, Seat::new(&id, &p));
                (shown != p.user_name).then(|| (p.user_name, shown))
            })
            .collect()
    }

    /// First participant whose registry name contains `needle`, ignoring case.
    pub fn find_participant(&self, needle: &str) -> Option<(ParticipantId, Participant)> {
        let needle = needle.to_lowercase();
        self.registry
            .participants()
            .into_iter()
            .find(|(_, p)| !p.user_name.is_empty() && p.user_name.to_lowercase().contains(&needle))
    }
}
