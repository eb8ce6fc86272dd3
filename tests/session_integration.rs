//! Integration tests: several clients sharing one transport.
//!
//! Each client has its own registry view, document, store and interpreter.
//! Payloads sent by one client are delivered by hand to the others, the way
//! the host relays them.

use std::sync::Arc;
use veneer_commands::{create_default_registry, CommandInterpreter};
use veneer_core::{CommandHandler, LocalConfig, OverlayConfig, Participant, TextObject, TextRenderer};
use veneer_overlay::memory::{ChatLog, MemoryDocument, MemoryRegistry, RecordingRenderer, RecordingTransport};
use veneer_overlay::{Host, Inbound, Overlay};

type Fallback = fn(&str) -> String;

fn passthrough(line: &str) -> String {
    line.to_string()
}

struct Client {
    overlay: Arc<Overlay>,
    interpreter: CommandInterpreter<Fallback>,
    document: Arc<MemoryDocument>,
    transport: Arc<RecordingTransport>,
    chat: Arc<ChatLog>,
}

impl Client {
    fn new(local_id: &str) -> Self {
        let registry = Arc::new(MemoryRegistry::new(local_id));
        registry.insert("1", Participant::new("alice", 5));
        registry.insert("2", Participant::new("bob", 8));
        registry.insert("3", Participant::new("khayrie", 77));

        let document = Arc::new(MemoryDocument::new());
        for (name, level) in [("alice", 5), ("bob", 8), ("khayrie", 77)] {
            document.append(".newbonklobby_playerentry_name", name);
            document.append(".newbonklobby_playerentry_level", &veneer_core::rank_label(level));
        }

        let transport = Arc::new(RecordingTransport::new());
        let chat = Arc::new(ChatLog::new());
        let config = OverlayConfig {
            privileged: vec!["khayrie".into()],
            local: LocalConfig {
                display_name: None,
                name_active: false,
                rank_label: "Level 999".into(),
                gradient: None,
            },
            ..OverlayConfig::default()
        };
        let overlay = Arc::new(
            Overlay::new(
                &config,
                Host {
                    registry,
                    transport: transport.clone(),
                    document: document.clone(),
                    chat: chat.clone(),
                },
            )
            .unwrap(),
        );
        let interpreter =
            CommandInterpreter::new(create_default_registry(), overlay.clone(), passthrough as Fallback);
        Self {
            overlay,
            interpreter,
            document,
            transport,
            chat,
        }
    }

    fn texts(&self) -> Vec<String> {
        self.document.dump().into_iter().map(|(_, _, text)| text).collect()
    }
}

/// Deliver everything `from` has sent to each of `to`.
fn relay(from: &Client, to: &[&Client]) -> Vec<Vec<Inbound>> {
    let payloads = from.transport.take();
    to.iter()
        .map(|client| {
            payloads
                .iter()
                .map(|p| client.overlay.handle_incoming(p))
                .collect()
        })
        .collect()
}

// ===========================================================================
// Cosmetic announcements
// ===========================================================================

#[test]
fn renamed_client_is_seen_renamed_by_peers() {
    let alice = Client::new("1");
    let bob = Client::new("2");

    alice.interpreter.handle("/name Star");
    alice.transport.take();
    alice.interpreter.handle("/level 42");
    // each announcement carries the full record
    let outcomes = relay(&alice, &[&bob]);
    assert_eq!(outcomes[0], vec![Inbound::Cosmetic("1".into())]);

    // bob's own entry carries bob's local rank label
    assert_eq!(
        bob.texts(),
        vec!["Star", "Level 42", "bob", "Level 999", "khayrie", "Level 77"]
    );
}

#[test]
fn privileged_viewer_sees_real_levels_but_custom_names() {
    let alice = Client::new("1");
    let owner = Client::new("3");

    alice.interpreter.handle("/name Star");
    alice.transport.take();
    alice.interpreter.handle("/level 42");
    relay(&alice, &[&owner]);

    assert_eq!(
        owner.texts(),
        vec!["Star", "Level 5", "bob", "Level 8", "khayrie", "Level 77"]
    );
}

#[test]
fn later_announcement_replaces_earlier() {
    let alice = Client::new("1");
    let bob = Client::new("2");

    alice.interpreter.handle("/name Star");
    alice.interpreter.handle("/name Comet");
    relay(&alice, &[&bob]);

    let store = bob.overlay.context().store();
    let record = store.remote(&"1".into()).unwrap();
    assert_eq!(record.name, "Comet");
}

#[test]
fn own_announcement_echo_is_ignored() {
    let alice = Client::new("1");
    alice.interpreter.handle("/name Star");
    let outcomes = relay(&alice, &[&alice]);
    assert!(outcomes[0].iter().all(|o| *o == Inbound::Ignored));
    assert!(alice.overlay.context().store().remote(&"1".into()).is_none());
}

// ===========================================================================
// Nicknames and private messages
// ===========================================================================

#[test]
fn nicknames_stay_local() {
    let alice = Client::new("1");
    let bob = Client::new("2");

    alice.interpreter.handle("/nick bob Robert");
    assert!(alice.texts().contains(&"Robert".to_string()));

    let outcomes = relay(&alice, &[&bob]);
    assert_eq!(outcomes[0], vec![Inbound::Ignored]);
    assert!(bob.texts().contains(&"bob".to_string()));
    assert!(!bob.texts().contains(&"Robert".to_string()));
}

#[test]
fn private_message_reaches_only_its_target() {
    let alice = Client::new("1");
    let bob = Client::new("2");
    let owner = Client::new("3");

    alice.interpreter.handle("/name Star");
    alice.transport.take();
    alice.interpreter.handle("/m bob meet at spawn");

    let outcomes = relay(&alice, &[&bob, &owner]);
    assert_eq!(
        outcomes[0],
        vec![Inbound::PrivateMessage {
            from: "Star".into(),
            content: "meet at spawn".into(),
        }]
    );
    assert_eq!(outcomes[1], vec![Inbound::Ignored]);
    assert_eq!(bob.chat.texts(), vec!["[PM from Star] meet at spawn"]);
    assert!(owner.chat.texts().is_empty());
}

// ===========================================================================
// Render hook and host passthrough
// ===========================================================================

#[test]
fn canvas_text_uses_peer_names() {
    let alice = Client::new("1");
    let bob = Client::new("2");
    alice.interpreter.handle("/name Star");
    relay(&alice, &[&bob]);

    let renderer = bob.overlay.intercept(RecordingRenderer::new());
    let mut label = TextObject::new("alice");
    renderer.update_text(&mut label);
    assert_eq!(label.text, "Star");
    assert_eq!(renderer.inner().drawn()[0].text, "Star");
}

#[test]
fn unowned_lines_pass_through_untouched() {
    let alice = Client::new("1");
    assert_eq!(alice.interpreter.handle("gg everyone"), "gg everyone");
    assert_eq!(alice.interpreter.handle("/kick bob"), "/kick bob");
    assert!(alice.transport.sent().is_empty());
}
