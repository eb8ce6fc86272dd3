//! Gradient animator - one timer loop per animated element
//!
//! Each element gets at most one loop, tracked by a cancellation token keyed
//! on its node id. A loop that finds its element detached cancels its own
//! token and drops the marker; it never reattaches.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use veneer_core::{Document, GradientSpec, NodeId};

#[derive(Clone)]
pub struct GradientAnimator {
    document: Arc<dyn Document>,
    loops: Arc<DashMap<NodeId, CancellationToken>>,
    shutdown: CancellationToken,
}

impl GradientAnimator {
    pub fn new(document: Arc<dyn Document>) -> Self {
        Self {
            document,
            loops: Arc::new(DashMap::new()),
            shutdown: CancellationToken::new(),
        }
    }

    /// Start animating `node`. Returns false if it is already animating or no
    /// runtime is available to drive the timer.
    pub fn attach(&self, node: NodeId, spec: GradientSpec) -> bool {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(h) => h,
            Err(_) => {
                warn!("No runtime to animate {}", node);
                return false;
            }
        };
        let token = match self.loops.entry(node) {
            Entry::Occupied(_) => return false,
            Entry::Vacant(slot) => slot.insert(self.shutdown.child_token()).clone(),
        };
        debug!("Animating {} every {}ms", node, spec.period_ms());
        handle.spawn(run_loop(
            self.document.clone(),
            self.loops.clone(),
            node,
            spec,
            token,
        ));
        true
    }

    pub fn is_animating(&self, node: NodeId) -> bool {
        self.loops.contains_key(&node)
    }

    pub fn active(&self) -> usize {
        self.loops.len()
    }

    /// Stop every loop.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

async fn run_loop(
    document: Arc<dyn Document>,
    loops: Arc<DashMap<NodeId, CancellationToken>>,
    node: NodeId,
    spec: GradientSpec,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(Duration::from_millis(u64::from(spec.period_ms())));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut angle: u16 = 0;
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {
                if !document.is_connected(node) {
                    debug!("{} detached, stopping animation", node);
                    token.cancel();
                    break;
                }
                angle = (angle + 1) % 360;
                paint(document.as_ref(), node, &spec, angle);
            }
        }
    }
    loops.remove(&node);
}

fn paint(document: &dyn Document, node: NodeId, spec: &GradientSpec, angle: u16) {
    document.set_style(node, "background-image", &spec.css_image(angle));
    document.set_style(node, "background-clip", "text");
    document.set_style(node, "-webkit-background-clip", "text");
}
