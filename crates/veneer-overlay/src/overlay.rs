//! Overlay - wires store, policy, gossip, reconciler and animator to a host

use crate::animator::GradientAnimator;
use crate::context::OverlayContext;
use crate::gossip::{Gossip, Inbound};
use crate::interceptor::InterceptedRenderer;
use crate::policy::VisibilityPolicy;
use crate::reconciler::{DomReconciler, PassReport};
use crate::store::{LocalOverride, OverrideStore};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;
use veneer_core::{
    ChatColors, ChatSink, Document, OverlayConfig, ParticipantRegistry, Result, TextRenderer,
    Transport,
};

/// The host collaborators an overlay is attached to.
#[derive(Clone)]
pub struct Host {
    pub registry: Arc<dyn ParticipantRegistry>,
    pub transport: Arc<dyn Transport>,
    pub document: Arc<dyn Document>,
    pub chat: Arc<dyn ChatSink>,
}

pub struct Overlay {
    context: Arc<OverlayContext>,
    gossip: Gossip,
    reconciler: Arc<DomReconciler>,
    chat: Arc<dyn ChatSink>,
    colors: ChatColors,
    highlight_fill: u32,
    tick: std::time::Duration,
    cancel: CancellationToken,
}

impl Overlay {
    pub fn new(config: &OverlayConfig, host: Host) -> Result<Self> {
        let local = LocalOverride::from_config(&config.local)?;
        let store = OverrideStore::new(host.registry.local_id(), local);
        let policy = VisibilityPolicy::new(config.privileged.iter().cloned());
        let context = Arc::new(OverlayContext::new(host.registry, store, policy));

        let animator = GradientAnimator::new(host.document.clone());
        let reconciler = Arc::new(DomReconciler::new(
            context.clone(),
            host.document,
            animator,
            config.catalog.clone(),
        ));

        Ok(Self {
            gossip: Gossip::new(context.clone(), host.transport),
            context,
            reconciler,
            chat: host.chat,
            colors: config.chat.clone(),
            highlight_fill: config.highlight_fill,
            tick: config.reconcile_tick(),
            cancel: CancellationToken::new(),
        })
    }

    pub fn context(&self) -> &Arc<OverlayContext> {
        &self.context
    }

    pub fn gossip(&self) -> &Gossip {
        &self.gossip
    }

    pub fn reconciler(&self) -> &Arc<DomReconciler> {
        &self.reconciler
    }

    pub fn animator(&self) -> &GradientAnimator {
        self.reconciler.animator()
    }

    pub fn colors(&self) -> &ChatColors {
        &self.colors
    }

    pub fn reconcile(&self) -> PassReport {
        self.reconciler.reconcile()
    }

    /// Broadcast local state and patch the document right away. Called after
    /// every local mutation.
    pub fn publish(&self) -> PassReport {
        self.gossip.announce();
        self.reconcile()
    }

    /// Entry point for every payload the host transport delivers.
    pub fn handle_incoming(&self, raw: &str) -> Inbound {
        let inbound = self.gossip.receive(raw);
        match &inbound {
            Inbound::Cosmetic(_) => {
                self.reconcile();
            }
            Inbound::PrivateMessage { from, content } => {
                self.say(&format!("[PM from {}] {}", from, content), &self.colors.private);
            }
            Inbound::Ignored => {}
        }
        inbound
    }

    /// Wrap the host's text primitive.
    pub fn intercept<R: TextRenderer>(&self, inner: R) -> InterceptedRenderer<R> {
        InterceptedRenderer::new(inner, self.context.clone(), self.highlight_fill)
    }

    pub fn say(&self, text: &str, colors: &[String; 2]) {
        self.chat.display(text, &colors[0], &colors[1]);
    }

    pub fn info(&self, text: &str) {
        self.say(text, &self.colors.info);
    }

    pub fn error(&self, text: &str) {
        self.say(text, &self.colors.error);
    }

    /// Announce, then keep the document reconciled on the configured tick and
    /// on every mutation notification until [`Overlay::shutdown`].
    pub fn start(&self, mutations: mpsc::Receiver<()>) -> JoinHandle<()> {
        info!("Overlay attached for {}", self.context.local_id());
        self.gossip.announce();
        tokio::spawn(self.reconciler.clone().run(
            self.tick,
            mutations,
            self.cancel.child_token(),
        ))
    }

    pub fn shutdown(&self) {
        self.cancel.cancel();
        self.animator().shutdown();
    }
}
