//! In-memory host - registry, document, transport, chat and renderer doubles
//!
//! Used by the simulator binary and by tests. Selectors are limited to a
//! single `#id` or `.class`, which is all the element catalog uses.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};
use tokio::sync::mpsc;
use veneer_core::{
    ChatSink, Document, NodeId, Participant, ParticipantId, ParticipantRegistry, TextObject,
    TextRenderer, Transport,
};

fn locked<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

pub struct MemoryRegistry {
    local_id: ParticipantId,
    players: RwLock<Vec<(ParticipantId, Participant)>>,
}

impl MemoryRegistry {
    pub fn new(local_id: impl Into<ParticipantId>) -> Self {
        Self {
            local_id: local_id.into(),
            players: RwLock::new(Vec::new()),
        }
    }

    /// Add or replace a participant, keeping join order.
    pub fn insert(&self, id: impl Into<ParticipantId>, participant: Participant) {
        let id = id.into();
        let mut players = self.players.write().unwrap_or_else(PoisonError::into_inner);
        match players.iter_mut().find(|(pid, _)| *pid == id) {
            Some(slot) => slot.1 = participant,
            None => players.push((id, participant)),
        }
    }

    pub fn remove(&self, id: &ParticipantId) {
        self.players
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(pid, _)| pid != id);
    }
}

impl ParticipantRegistry for MemoryRegistry {
    fn participants(&self) -> Vec<(ParticipantId, Participant)> {
        self.players
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn local_id(&self) -> ParticipantId {
        self.local_id.clone()
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
struct Element {
    selector: String,
    text: String,
    style: HashMap<String, String>,
    connected: bool,
}

impl Element {
    fn matches(&self, selector: &str) -> bool {
        self.connected && self.selector.split_whitespace().any(|s| s == selector)
    }
}

/// A flat document: elements in insertion order, each tagged with the
/// selectors (`#id`, `.class`) it answers to.
#[derive(Default)]
pub struct MemoryDocument {
    elements: Mutex<BTreeMap<NodeId, Element>>,
    next_id: AtomicU64,
    writes: AtomicUsize,
    observers: Mutex<Vec<mpsc::Sender<()>>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element answering to the space-separated `selectors`.
    pub fn append(&self, selectors: &str, text: &str) -> NodeId {
        let id = NodeId(self.next_id.fetch_add(1, Ordering::Relaxed));
        locked(&self.elements).insert(
            id,
            Element {
                selector: selectors.to_string(),
                text: text.to_string(),
                style: HashMap::new(),
                connected: true,
            },
        );
        self.notify();
        id
    }

    /// Detach an element. It stays addressable but no longer matches queries.
    pub fn detach(&self, node: NodeId) {
        if let Some(el) = locked(&self.elements).get_mut(&node) {
            el.connected = false;
        }
    }

    /// Host-side text update (not counted as an overlay write).
    pub fn host_set_text(&self, node: NodeId, text: &str) {
        if let Some(el) = locked(&self.elements).get_mut(&node) {
            el.text = text.to_string();
        }
        self.notify();
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        locked(&self.elements)
            .get(&node)
            .and_then(|el| el.style.get(property).cloned())
    }

    /// Number of `set_text` calls made through the [`Document`] trait.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    /// Subscribe to subtree additions. Notifications coalesce.
    pub fn mutations(&self) -> mpsc::Receiver<()> {
        let (tx, rx) = mpsc::channel(1);
        locked(&self.observers).push(tx);
        rx
    }

    /// `(node, selectors, text)` for every attached element.
    pub fn dump(&self) -> Vec<(NodeId, String, String)> {
        locked(&self.elements)
            .iter()
            .filter(|(_, el)| el.connected)
            .map(|(id, el)| (*id, el.selector.clone(), el.text.clone()))
            .collect()
    }

    fn notify(&self) {
        locked(&self.observers).retain(|tx| !matches!(
            tx.try_send(()),
            Err(mpsc::error::TrySendError::Closed(_))
        ));
    }
}

impl Document for MemoryDocument {
    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        locked(&self.elements)
            .iter()
            .filter(|(_, el)| el.matches(selector))
            .map(|(id, _)| *id)
            .collect()
    }

    fn text(&self, node: NodeId) -> Option<String> {
        locked(&self.elements).get(&node).map(|el| el.text.clone())
    }

    fn set_text(&self, node: NodeId, text: &str) {
        if let Some(el) = locked(&self.elements).get_mut(&node) {
            el.text = text.to_string();
            self.writes.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn is_connected(&self, node: NodeId) -> bool {
        locked(&self.elements)
            .get(&node)
            .is_some_and(|el| el.connected)
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        if let Some(el) = locked(&self.elements).get_mut(&node) {
            el.style.insert(property.to_string(), value.to_string());
        }
    }
}

// ---------------------------------------------------------------------------
// Transport, chat, renderer
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<String>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<String> {
        locked(&self.sent).clone()
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *locked(&self.sent))
    }
}

impl Transport for RecordingTransport {
    fn send(&self, payload: String) {
        locked(&self.sent).push(payload);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub text: String,
    pub primary: String,
    pub secondary: String,
}

#[derive(Default)]
pub struct ChatLog {
    lines: Mutex<Vec<ChatLine>>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<ChatLine> {
        locked(&self.lines).clone()
    }

    pub fn texts(&self) -> Vec<String> {
        locked(&self.lines).iter().map(|l| l.text.clone()).collect()
    }
}

impl ChatSink for ChatLog {
    fn display(&self, text: &str, primary: &str, secondary: &str) {
        locked(&self.lines).push(ChatLine {
            text: text.to_string(),
            primary: primary.to_string(),
            secondary: secondary.to_string(),
        });
    }
}

/// Stand-in for the host's text primitive: records what it was asked to draw
/// and returns the draw count.
#[derive(Default)]
pub struct RecordingRenderer {
    drawn: Mutex<Vec<TextObject>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drawn(&self) -> Vec<TextObject> {
        locked(&self.drawn).clone()
    }
}

impl TextRenderer for RecordingRenderer {
    type Output = usize;

    fn update_text(&self, object: &mut TextObject) -> usize {
        let mut drawn = locked(&self.drawn);
        drawn.push(object.clone());
        drawn.len()
    }
}
