//! Override store - local and remote cosmetic records, no I/O
//!
//! Setters validate before touching state: a rejected call leaves the store
//! exactly as it was. Broadcast and reconciliation are the caller's job.

use std::collections::HashMap;
use veneer_core::{rank_label, Error, GradientSpec, LocalConfig, ParticipantId, Result};

pub const MAX_NAME_CHARS: usize = 20;
pub const MAX_LEVEL: u32 = 9999;

/// Overrides owned by this client for its own participant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalOverride {
    pub display_name: Option<String>,
    pub name_active: bool,
    pub rank_label: String,
    pub gradient: Option<GradientSpec>,
}

impl LocalOverride {
    pub fn from_config(config: &LocalConfig) -> Result<Self> {
        if let Some(name) = &config.display_name {
            validate_name(name, "Name must be 1-20 characters.")?;
        }
        validate_rank(&config.rank_label)?;
        Ok(Self {
            display_name: config.display_name.clone(),
            name_active: config.name_active,
            rank_label: config.rank_label.clone(),
            gradient: config.gradient.clone(),
        })
    }
}

impl Default for LocalOverride {
    fn default() -> Self {
        Self {
            display_name: None,
            name_active: false,
            rank_label: String::new(),
            gradient: None,
        }
    }
}

/// Last announcement received from a peer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteOverride {
    pub name: String,
    pub rank_label: String,
    pub gradient: Option<GradientSpec>,
}

/// Everything the store knows about one participant.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedOverride<'a> {
    pub nickname: Option<&'a str>,
    /// Present only when the id is the local participant.
    pub local: Option<&'a LocalOverride>,
    pub remote: Option<&'a RemoteOverride>,
}

pub struct OverrideStore {
    local_id: ParticipantId,
    local: LocalOverride,
    remote: HashMap<ParticipantId, RemoteOverride>,
    nicknames: HashMap<ParticipantId, String>,
}

impl OverrideStore {
    pub fn new(local_id: ParticipantId, local: LocalOverride) -> Self {
        Self {
            local_id,
            local,
            remote: HashMap::new(),
            nicknames: HashMap::new(),
        }
    }

    pub fn local_id(&self) -> &ParticipantId {
        &self.local_id
    }

    pub fn local(&self) -> &LocalOverride {
        &self.local
    }

    pub fn is_local(&self, id: &ParticipantId) -> bool {
        *id == self.local_id
    }

    /// Set the display name and switch substitution on.
    pub fn set_local_name(&mut self, name: &str) -> Result<()> {
        validate_name(name, "Name must be 1-20 characters.")?;
        self.local.display_name = Some(name.to_string());
        self.local.name_active = true;
        Ok(())
    }

    /// Flip name substitution; returns the new state.
    pub fn toggle_local_name_active(&mut self) -> bool {
        self.local.name_active = !self.local.name_active;
        self.local.name_active
    }

    pub fn set_local_rank(&mut self, label: &str) -> Result<()> {
        validate_rank(label)?;
        self.local.rank_label = label.to_string();
        Ok(())
    }

    /// Set the rank label to the host's `Level <n>` form.
    pub fn set_local_level(&mut self, level: i64) -> Result<()> {
        if !(0..=i64::from(MAX_LEVEL)).contains(&level) {
            return Err(Error::validation("Level must be 0-9999."));
        }
        self.local.rank_label = rank_label(level as u32);
        Ok(())
    }

    /// Specs are validated on construction, so this cannot fail.
    pub fn set_local_gradient(&mut self, spec: GradientSpec) {
        self.local.gradient = Some(spec);
    }

    pub fn clear_local_gradient(&mut self) {
        self.local.gradient = None;
    }

    pub fn set_nickname(&mut self, id: ParticipantId, text: &str) -> Result<()> {
        validate_name(text, "Nickname must be 1-20 characters.")?;
        self.nicknames.insert(id, text.to_string());
        Ok(())
    }

    pub fn nickname(&self, id: &ParticipantId) -> Option<&str> {
        self.nicknames.get(id).map(String::as_str)
    }

    /// Last write wins. The local participant never holds a remote record.
    pub fn apply_remote(&mut self, id: ParticipantId, record: RemoteOverride) -> Result<()> {
        if self.is_local(&id) {
            return Err(Error::validation(format!(
                "{} is the local participant",
                id
            )));
        }
        self.remote.insert(id, record);
        Ok(())
    }

    pub fn remote(&self, id: &ParticipantId) -> Option<&RemoteOverride> {
        self.remote.get(id)
    }

    pub fn remote_count(&self) -> usize {
        self.remote.len()
    }

    pub fn get(&self, id: &ParticipantId) -> ResolvedOverride<'_> {
        ResolvedOverride {
            nickname: self.nickname(id),
            local: self.is_local(id).then_some(&self.local),
            remote: self.remote(id),
        }
    }
}

fn validate_name(text: &str, message: &str) -> Result<()> {
    let len = text.chars().count();
    if len == 0 || len > MAX_NAME_CHARS {
        return Err(Error::validation(message));
    }
    Ok(())
}

fn validate_rank(label: &str) -> Result<()> {
    if label.trim().is_empty() {
        return Err(Error::validation("Rank label must not be empty."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> OverrideStore {
        OverrideStore::new("1".into(), LocalOverride::default())
    }

    #[test]
    fn set_local_name_activates() {
        let mut s = store();
        s.set_local_name("Star").unwrap();
        assert_eq!(s.local().display_name.as_deref(), Some("Star"));
        assert!(s.local().name_active);
        assert!(!s.toggle_local_name_active());
        assert!(s.toggle_local_name_active());
    }

    #[test]
    fn name_length_counts_chars() {
        let mut s = store();
        assert!(s.set_local_name(&"★".repeat(20)).is_ok());
        assert!(s.set_local_name(&"a".repeat(21)).is_err());
        assert!(s.set_local_name("").is_err());
        assert_eq!(s.local().display_name.as_deref(), Some("★".repeat(20).as_str()));
    }

    #[test]
    fn level_bounds() {
        let mut s = store();
        s.set_local_level(42).unwrap();
        assert_eq!(s.local().rank_label, "Level 42");
        assert!(s.set_local_level(10_000).is_err());
        assert!(s.set_local_level(-1).is_err());
        assert_eq!(s.local().rank_label, "Level 42");
    }

    #[test]
    fn free_form_rank_label() {
        let mut s = store();
        s.set_local_rank("Grandmaster").unwrap();
        assert_eq!(s.local().rank_label, "Grandmaster");
        assert!(s.set_local_rank("").is_err());
        assert_eq!(s.local().rank_label, "Grandmaster");
    }

    #[test]
    fn remote_refuses_local_id() {
        let mut s = store();
        let record = RemoteOverride {
            name: "x".into(),
            rank_label: "Level 1".into(),
            gradient: None,
        };
        assert!(s.apply_remote("1".into(), record.clone()).is_err());
        assert_eq!(s.remote_count(), 0);
        s.apply_remote("2".into(), record).unwrap();
        assert!(s.get(&"2".into()).remote.is_some());
        assert!(s.get(&"2".into()).local.is_none());
        assert!(s.get(&"1".into()).local.is_some());
    }

    #[test]
    fn from_config_validates() {
        let mut config = LocalConfig::default();
        assert!(LocalOverride::from_config(&config).is_ok());
        config.display_name = Some("x".repeat(25));
        assert!(LocalOverride::from_config(&config).is_err());
    }
}
