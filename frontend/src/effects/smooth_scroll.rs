use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Window};

use crate::config;
use crate::error::{EffectError, EffectResult};
use crate::utils::dom::{self, Listener};
use crate::utils::timing::{next_frame, Generation, Ticket};

pub fn ease_out_quint(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(5)
}

/// Scroll offset that leaves a small gap above the target.
pub fn target_offset(rect_top: f64, scroll_y: f64) -> f64 {
    rect_top + scroll_y - config::SMOOTH_SCROLL_OFFSET_PX
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTween {
    start: f64,
    target: f64,
    duration_ms: f64,
}

impl ScrollTween {
    pub fn new(start: f64, target: f64, duration_ms: f64) -> Self {
        Self {
            start,
            target,
            duration_ms: duration_ms.max(1.0),
        }
    }

    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms
    }

    /// Scroll offset for a frame `elapsed_ms` into the animation.
    pub fn sample(&self, elapsed_ms: f64) -> f64 {
        if self.is_finished(elapsed_ms) {
            return self.target;
        }
        let eased = ease_out_quint(self.progress(elapsed_ms));
        self.start + (self.target - self.start) * eased
    }
}

/// Animates the window scroll position. Starting a new animation makes any
/// in-flight one stop at its next frame.
#[derive(Clone, Default)]
pub struct SmoothScroller {
    generation: Generation,
}

impl SmoothScroller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_to(&self, target: &Element) {
        let window = match dom::window() {
            Ok(window) => window,
            Err(e) => {
                log::debug!("smooth scroll skipped: {}", e);
                return;
            }
        };
        let start = dom::scroll_top(&window);
        let destination = target_offset(dom::rect(target).top, start);
        let tween = ScrollTween::new(start, destination, config::SMOOTH_SCROLL_MS);
        let ticket = self.generation.advance();

        spawn_local(async move {
            if let Err(e) = animate(&window, tween, ticket).await {
                log::warn!("smooth scroll aborted: {}", e);
            }
        });
    }
}

async fn animate(window: &Window, tween: ScrollTween, ticket: Ticket) -> EffectResult<()> {
    let mut started_at = None;
    loop {
        let now = next_frame(window).await?;
        if !ticket.is_current() {
            log::trace!("smooth scroll superseded");
            return Ok(());
        }
        let elapsed = now - *started_at.get_or_insert(now);
        window.scroll_to_with_x_and_y(0.0, tween.sample(elapsed));
        if tween.is_finished(elapsed) {
            return Ok(());
        }
    }
}

/// In-page `#fragment` links that smooth-scroll instead of jumping.
pub struct AnchorLinks {
    _listeners: Vec<Listener>,
}

impl AnchorLinks {
    pub fn mount(document: &Document, scroller: &SmoothScroller) -> EffectResult<Self> {
        let anchors = dom::query_all(document, config::ANCHOR_SELECTOR);
        if anchors.is_empty() {
            return Err(EffectError::MissingElement(config::ANCHOR_SELECTOR));
        }

        let mut listeners = Vec::with_capacity(anchors.len());
        for anchor in anchors {
            let scroller = scroller.clone();
            let document = document.clone();
            let link = anchor.clone();
            listeners.push(Listener::new(&anchor, "click", move |event| {
                event.prevent_default();

                dom::set_style(&link, "transform", "translateY(2px)");
                let pressed = link.clone();
                spawn_local(async move {
                    TimeoutFuture::new(config::ANCHOR_PRESS_MS).await;
                    dom::set_style(&pressed, "transform", "");
                });

                let Some(href) = link.get_attribute("href") else { return };
                // "#" alone or a malformed fragment is not a valid selector
                let Ok(Some(target)) = document.query_selector(&href) else { return };
                scroller.scroll_to(&target);

                if let Some(history) = dom::window().ok().and_then(|w| w.history().ok()) {
                    let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&href));
                }
            })?);
        }

        Ok(Self {
            _listeners: listeners,
        })
    }
}
