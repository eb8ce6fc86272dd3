//! Veneer Overlay - local presentation overrides kept in sync with a host session
//!
//! The store and policy are pure. Everything that produces visible output
//! (reconciler, render hook, animator) reads through [`OverlayContext`];
//! only the command layer and inbound gossip write to it.

pub mod animator;
pub mod context;
pub mod gossip;
pub mod interceptor;
pub mod memory;
pub mod overlay;
pub mod policy;
pub mod reconciler;
pub mod store;

pub use animator::GradientAnimator;
pub use context::OverlayContext;
pub use gossip::{Gossip, Inbound};
pub use interceptor::InterceptedRenderer;
pub use overlay::{Host, Overlay};
pub use policy::{Field, Resolved, Seat, VisibilityPolicy};
pub use reconciler::{DomReconciler, PassReport};
pub use store::{LocalOverride, OverrideStore, RemoteOverride, ResolvedOverride};
