//! DOM reconciler - idempotent patching of identity-bearing elements
//!
//! A pass walks the selector catalog in order, then each selector's matches
//! in document order. An element whose text contains a participant's
//! registry-true value (username for names, `Level <n>` for ranks) has every
//! occurrence replaced with the policy-resolved value and is marked processed
//! for that catalog entry. Names are plain substrings; rank labels only match
//! whole, so `Level 1` is not found inside `Level 12`. Processed elements are never looked at again while
//! they stay attached, even if the host later reuses them for someone else.

use crate::animator::GradientAnimator;
use crate::context::OverlayContext;
use crate::policy::{Seat, VisibilityPolicy};
use crate::store::OverrideStore;
use dashmap::DashMap;
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use veneer_core::{CatalogEntry, Document, FieldKind, GradientSpec, NodeId, Participant, ParticipantId};

/// A whole rank label as the host renders it; the number is never cut short.
static RANK_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Level \d+").expect("rank label pattern"));

/// Counters for a single pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Unprocessed elements examined.
    pub scanned: usize,
    /// Elements whose text was rewritten.
    pub patched: usize,
    /// Elements handed to the animator for the first time.
    pub animated: usize,
}

pub struct DomReconciler {
    context: Arc<OverlayContext>,
    document: Arc<dyn Document>,
    animator: GradientAnimator,
    catalog: Vec<CatalogEntry>,
    /// node -> catalog indices already processed
    processed: DashMap<NodeId, HashSet<usize>>,
}

impl DomReconciler {
    pub fn new(
        context: Arc<OverlayContext>,
        document: Arc<dyn Document>,
        animator: GradientAnimator,
        catalog: Vec<CatalogEntry>,
    ) -> Self {
        Self {
            context,
            document,
            animator,
            catalog,
            processed: DashMap::new(),
        }
    }

    pub fn animator(&self) -> &GradientAnimator {
        &self.animator
    }

    pub fn is_processed(&self, node: NodeId) -> bool {
        self.processed.get(&node).is_some_and(|set| !set.is_empty())
    }

    /// One sweep over the catalog.
    pub fn reconcile(&self) -> PassReport {
        self.processed.retain(|node, _| self.document.is_connected(*node));

        let participants = self.context.registry().participants();
        let (viewer_id, viewer_identity) = self.context.local_participant();
        let viewer = Seat::new(&viewer_id, &viewer_identity);
        let policy = self.context.policy();
        let mut report = PassReport::default();

        for (index, entry) in self.catalog.iter().enumerate() {
            for node in self.document.query_all(&entry.selector) {
                if self.processed.get(&node).is_some_and(|set| set.contains(&index)) {
                    continue;
                }
                let Some(original) = self.document.text(node) else {
                    continue;
                };
                report.scanned += 1;

                let patched = {
                    let store = self.context.store();
                    match entry.field {
                        FieldKind::Name => patch_names(&original, &participants, policy, &store),
                        FieldKind::Rank => patch_ranks(&original, &participants, policy, &store, viewer)
                            .map(|text| (text, None)),
                    }
                };
                let Some((text, gradient)) = patched else {
                    continue;
                };

                if text != original {
                    debug!("{} {:?}: {:?} -> {:?}", node, entry.field, original, text);
                    self.document.set_text(node, &text);
                    report.patched += 1;
                }
                self.processed.entry(node).or_default().insert(index);
                if let Some(spec) = gradient {
                    if self.animator.attach(node, spec) {
                        report.animated += 1;
                    }
                }
            }
        }
        report
    }

    /// Drive passes from a fixed tick and from document mutation notifications
    /// until `cancel` fires. Bursts of notifications coalesce into one pass.
    pub async fn run(
        self: Arc<Self>,
        tick: Duration,
        mut mutations: mpsc::Receiver<()>,
        cancel: CancellationToken,
    ) {
        info!("Reconciler started, {} catalog entries, tick {:?}", self.catalog.len(), tick);
        let mut ticker = tokio::time::interval(tick);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let mut observing = true;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    self.reconcile();
                }
                notice = mutations.recv(), if observing => {
                    match notice {
                        Some(()) => {
                            while mutations.try_recv().is_ok() {}
                            self.reconcile();
                        }
                        None => {
                            debug!("Mutation feed closed, continuing on tick only");
                            observing = false;
                        }
                    }
                }
            }
        }
        info!("Reconciler stopped");
    }
}

/// Replace each participant's username in registry order. The first subject
/// with a gradient decides the element's animation.
fn patch_names(
    original: &str,
    participants: &[(ParticipantId, Participant)],
    policy: &VisibilityPolicy,
    store: &OverrideStore,
) -> Option<(String, Option<GradientSpec>)> {
    let mut text = original.to_string();
    let mut matched = false;
    let mut gradient = None;
    for (id, participant) in participants {
        let needle = &participant.user_name;
        if needle.is_empty() || !text.contains(needle.as_str()) {
            continue;
        }
        matched = true;
        let subject = Seat::new(id, participant);
        text = text.replace(needle.as_str(), &policy.display_name(store, subject));
        if gradient.is_none() {
            gradient = policy.gradient(store, subject);
        }
    }
    matched.then_some((text, gradient))
}

/// Resolve every rank label in the original text in a single sweep, so a
/// substituted label is never read again as someone else's. A label shared by
/// several participants belongs to the first in registry order.
fn patch_ranks(
    original: &str,
    participants: &[(ParticipantId, Participant)],
    policy: &VisibilityPolicy,
    store: &OverrideStore,
    viewer: Seat<'_>,
) -> Option<String> {
    let mut matched = false;
    let text = RANK_LABEL.replace_all(original, |caps: &Captures<'_>| {
        let label = &caps[0];
        let owner = participants
            .iter()
            .find(|(_, p)| !p.user_name.is_empty() && p.rank_label() == label);
        match owner {
            Some((id, participant)) => {
                matched = true;
                policy.rank(store, viewer, Seat::new(id, participant))
            }
            None => label.to_string(),
        }
    });
    matched.then(|| text.into_owned())
}
