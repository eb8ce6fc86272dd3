//! Visibility policy - which value a viewer sees for a subject
//!
//! Name overrides apply to everyone. Rank overrides are dropped whenever the
//! viewer or the subject is privileged: privileged viewers always see true
//! ranks, and a privileged subject's true rank is visible to all.

use crate::store::OverrideStore;
use std::collections::HashSet;
use veneer_core::{GradientSpec, Participant, ParticipantId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Rank,
    Gradient,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    Text(String),
    Gradient(Option<GradientSpec>),
}

/// A participant as seen by the policy: registry id plus registry-true identity.
#[derive(Clone, Copy, Debug)]
pub struct Seat<'a> {
    pub id: &'a ParticipantId,
    pub participant: &'a Participant,
}

impl<'a> Seat<'a> {
    pub fn new(id: &'a ParticipantId, participant: &'a Participant) -> Self {
        Self { id, participant }
    }
}

#[derive(Clone, Debug, Default)]
pub struct VisibilityPolicy {
    privileged: HashSet<String>,
}

impl VisibilityPolicy {
    pub fn new<I, S>(privileged: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            privileged: privileged.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_privileged(&self, user_name: &str) -> bool {
        self.privileged.contains(user_name)
    }

    pub fn privileged_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.privileged.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn resolve(
        &self,
        store: &OverrideStore,
        viewer: Seat<'_>,
        subject: Seat<'_>,
        field: Field,
    ) -> Resolved {
        match field {
            Field::Name => Resolved::Text(self.display_name(store, subject)),
            Field::Rank => Resolved::Text(self.rank(store, viewer, subject)),
            Field::Gradient => Resolved::Gradient(self.gradient(store, subject)),
        }
    }

    /// Nickname, then active local override, then peer announcement, then registry.
    pub fn display_name(&self, store: &OverrideStore, subject: Seat<'_>) -> String {
        let record = store.get(subject.id);
        if let Some(nick) = record.nickname {
            return nick.to_string();
        }
        if let Some(local) = record.local.filter(|l| l.name_active) {
            if let Some(name) = &local.display_name {
                return name.clone();
            }
        }
        match record.remote {
            Some(remote) => remote.name.clone(),
            None => subject.participant.user_name.clone(),
        }
    }

    pub fn rank(&self, store: &OverrideStore, viewer: Seat<'_>, subject: Seat<'_>) -> String {
        let real = subject.participant.rank_label();
        if self.is_privileged(&viewer.participant.user_name)
            || self.is_privileged(&subject.participant.user_name)
        {
            return real;
        }
        let record = store.get(subject.id);
        if let Some(local) = record.local {
            return local.rank_label.clone();
        }
        match record.remote {
            Some(remote) => remote.rank_label.clone(),
            None => real,
        }
    }

    /// Same subject precedence as the name, minus nicknames. `None` means no animation.
    pub fn gradient(&self, store: &OverrideStore, subject: Seat<'_>) -> Option<GradientSpec> {
        let record = store.get(subject.id);
        if let Some(local) = record.local.filter(|l| l.name_active) {
            return local.gradient.clone();
        }
        record.remote.and_then(|r| r.gradient.clone())
    }
}
