//! Render hook - substitutes display names in text right before it is drawn.
//!
//! Replacement is plain substring replace-all with no word boundaries, in
//! registry order, matching how the host itself labels players. One name
//! containing another can cascade; that is left as the host would do it.

use crate::context::OverlayContext;
use std::sync::Arc;
use veneer_core::{TextObject, TextRenderer};

/// Decorator over the host's text primitive. The wrapped renderer always
/// runs, and its output is returned untouched.
pub struct InterceptedRenderer<R> {
    inner: R,
    context: Arc<OverlayContext>,
    highlight_fill: u32,
}

impl<R: TextRenderer> InterceptedRenderer<R> {
    pub fn new(inner: R, context: Arc<OverlayContext>, highlight_fill: u32) -> Self {
        Self {
            inner,
            context,
            highlight_fill,
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    fn substitute(&self, object: &mut TextObject) {
        for (real, shown) in self.context.name_substitutions() {
            if object.text.contains(&real) {
                object.text = object.text.replace(&real, &shown);
                object.style.fill = self.highlight_fill;
            }
        }
    }
}

impl<R: TextRenderer> TextRenderer for InterceptedRenderer<R> {
    type Output = R::Output;

    fn update_text(&self, object: &mut TextObject) -> Self::Output {
        self.substitute(object);
        self.inner.update_text(object)
    }
}
