//! Testimonial slider.
//!
//! `CarouselState` is the whole state machine: one current card, an
//! `Idle`/`Exiting`/`Entering` phase, and whether the pointer is over the
//! slider. `Carousel` drives it from arrow clicks, hover, and an
//! auto-advance interval, and paints cards through the `CardStage` trait.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlElement};

use crate::config;
use crate::error::{EffectError, EffectResult};
use crate::utils::dom::{self, Listener};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Plain index comparison, so wrapping from the last card to the first
    /// animates backwards.
    pub fn between(from: usize, to: usize) -> Self {
        if to > from {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    pub fn exit_transform(self) -> &'static str {
        match self {
            Direction::Forward => "translateX(-20px) scale(0.95)",
            Direction::Backward => "translateX(20px) scale(0.95)",
        }
    }

    pub fn entry_transform(self) -> &'static str {
        match self {
            Direction::Forward => "translateX(20px) scale(0.95)",
            Direction::Backward => "translateX(-20px) scale(0.95)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slide {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Exiting(Slide),
    Entering(Slide),
}

/// Presentation of the cards. The DOM implementation animates inline
/// styles; tests record calls.
pub trait CardStage {
    fn play_exit(&self, card: usize, direction: Direction);
    fn play_entry(&self, card: usize, direction: Direction);
    fn set_active(&self, card: usize, active: bool);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarouselState {
    len: usize,
    current: usize,
    phase: Phase,
    hovered: bool,
}

impl CarouselState {
    /// `None` for fewer than two cards: nothing to slide between.
    pub fn new(len: usize) -> Option<Self> {
        (len > 1).then_some(Self {
            len,
            current: 0,
            phase: Phase::Idle,
            hovered: false,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn current(&self) -> usize {
        self.current
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn next_index(&self) -> usize {
        (self.current + 1) % self.len
    }

    pub fn previous_index(&self) -> usize {
        (self.current + self.len - 1) % self.len
    }

    /// Starts a slide towards `target` unless one is already running.
    pub fn request_slide(&mut self, target: usize, stage: &impl CardStage) -> Option<Slide> {
        if self.is_animating() || target >= self.len {
            return None;
        }
        let slide = Slide {
            from: self.current,
            to: target,
            direction: Direction::between(self.current, target),
        };
        self.phase = Phase::Exiting(slide);
        stage.play_exit(slide.from, slide.direction);
        Some(slide)
    }

    pub fn next(&mut self, stage: &impl CardStage) -> Option<Slide> {
        self.request_slide(self.next_index(), stage)
    }

    pub fn previous(&mut self, stage: &impl CardStage) -> Option<Slide> {
        self.request_slide(self.previous_index(), stage)
    }

    /// Timer tick. Does nothing while hovered or mid-transition.
    pub fn auto_advance(&mut self, stage: &impl CardStage) -> Option<Slide> {
        if self.is_hovered() {
            return None;
        }
        self.next(stage)
    }

    pub fn pointer_enter(&mut self) {
        self.hovered = true;
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = false;
    }

    /// Outgoing card finished leaving: swap which card is active and start
    /// bringing the incoming one in.
    pub fn finish_exit(&mut self, stage: &impl CardStage) -> Option<Slide> {
        let Phase::Exiting(slide) = self.phase else {
            return None;
        };
        stage.set_active(slide.from, false);
        stage.play_entry(slide.to, slide.direction);
        stage.set_active(slide.to, true);
        self.phase = Phase::Entering(slide);
        Some(slide)
    }

    /// Incoming card settled: the slide is complete.
    pub fn finish_entry(&mut self) -> Option<usize> {
        let Phase::Entering(slide) = self.phase else {
            return None;
        };
        self.current = slide.to;
        self.phase = Phase::Idle;
        Some(self.current)
    }
}

struct CardElements {
    cards: Vec<HtmlElement>,
}

impl CardElements {
    fn card(&self, index: usize) -> Option<&HtmlElement> {
        self.cards.get(index)
    }
}

impl CardStage for CardElements {
    fn play_exit(&self, card: usize, direction: Direction) {
        let Some(card) = self.card(card) else { return };
        dom::set_style(card, "transition", &slide_transition(config::SLIDE_EXIT_MS));
        dom::set_style(card, "transform", direction.exit_transform());
        dom::set_style(card, "opacity", "0");
    }

    fn play_entry(&self, card: usize, direction: Direction) {
        let Some(card) = self.card(card) else { return };
        dom::set_style(card, "transition", "none");
        dom::set_style(card, "transform", direction.entry_transform());
        dom::set_style(card, "opacity", "0");
        dom::force_layout(card);

        dom::set_style(card, "transition", &slide_transition(config::SLIDE_ENTER_MS));
        dom::set_style(card, "transform", "translateX(0) scale(1)");
        dom::set_style(card, "opacity", "1");
    }

    fn set_active(&self, card: usize, active: bool) {
        let Some(card) = self.card(card) else { return };
        if active {
            dom::add_class(card, config::ACTIVE_CLASS);
        } else {
            dom::remove_class(card, config::ACTIVE_CLASS);
        }
    }
}

fn slide_transition(ms: u32) -> String {
    let seconds = f64::from(ms) / 1000.0;
    format!(
        "opacity {s}s {e}, transform {s}s {e}",
        s = seconds,
        e = config::SLIDE_EASING
    )
}

struct Inner {
    state: RefCell<CarouselState>,
    stage: CardElements,
    auto_advance: RefCell<Option<Interval>>,
}

impl Inner {
    fn begin(self: &Rc<Self>, slide: Option<Slide>) {
        let Some(slide) = slide else { return };
        log::trace!("testimonial {} -> {}", slide.from, slide.to);
        let inner = self.clone();
        spawn_local(async move {
            TimeoutFuture::new(config::SLIDE_EXIT_MS).await;
            inner.state.borrow_mut().finish_exit(&inner.stage);
            TimeoutFuture::new(config::SLIDE_ENTER_MS).await;
            inner.state.borrow_mut().finish_entry();
        });
    }

    fn start_auto_advance(self: &Rc<Self>) {
        let inner = self.clone();
        let interval = Interval::new(config::AUTO_ADVANCE_MS, move || {
            let slide = inner.state.borrow_mut().auto_advance(&inner.stage);
            inner.begin(slide);
        });
        // Replacing an existing interval cancels it.
        *self.auto_advance.borrow_mut() = Some(interval);
    }

    fn stop_auto_advance(&self) {
        self.auto_advance.borrow_mut().take();
    }
}

pub struct Carousel {
    inner: Rc<Inner>,
    _listeners: Vec<Listener>,
}

impl Carousel {
    pub fn mount(document: &Document) -> EffectResult<Self> {
        let cards = dom::query_all(document, config::TESTIMONIAL_CARD_SELECTOR);
        if let Some(first) = cards.first() {
            dom::add_class(first, config::ACTIVE_CLASS);
        }
        let state = CarouselState::new(cards.len()).ok_or(EffectError::TooFewElements {
            selector: config::TESTIMONIAL_CARD_SELECTOR,
            found: cards.len(),
        })?;

        let inner = Rc::new(Inner {
            state: RefCell::new(state),
            stage: CardElements { cards },
            auto_advance: RefCell::new(None),
        });

        let mut listeners = Vec::new();
        if let Ok(arrow) = dom::query(document, config::PREV_ARROW_SELECTOR) {
            listeners.push(arrow_listener(&inner, arrow, |state, stage| state.previous(stage))?);
        }
        if let Ok(arrow) = dom::query(document, config::NEXT_ARROW_SELECTOR) {
            listeners.push(arrow_listener(&inner, arrow, |state, stage| state.next(stage))?);
        }
        if let Ok(container) = dom::query(document, config::SLIDER_CONTAINER_SELECTOR) {
            let on_enter = inner.clone();
            listeners.push(Listener::new(&container, "mouseenter", move |_| {
                on_enter.state.borrow_mut().pointer_enter();
                on_enter.stop_auto_advance();
            })?);
            let on_leave = inner.clone();
            listeners.push(Listener::new(&container, "mouseleave", move |_| {
                on_leave.state.borrow_mut().pointer_leave();
                on_leave.start_auto_advance();
            })?);
        }

        inner.start_auto_advance();
        log::debug!("testimonial carousel with {} cards", inner.state.borrow().len());

        Ok(Self {
            inner,
            _listeners: listeners,
        })
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        self.inner.stop_auto_advance();
    }
}

type Step = fn(&mut CarouselState, &CardElements) -> Option<Slide>;

fn arrow_listener(inner: &Rc<Inner>, arrow: HtmlElement, step: Step) -> EffectResult<Listener> {
    let inner = inner.clone();
    let pressed = arrow.clone();
    Listener::new(&arrow, "click", move |_| {
        pulse(pressed.clone());
        let slide = step(&mut inner.state.borrow_mut(), &inner.stage);
        inner.begin(slide);
    })
}

fn pulse(arrow: HtmlElement) {
    dom::set_style(&arrow, "transform", "translateY(-50%) scale(0.9)");
    spawn_local(async move {
        TimeoutFuture::new(config::ARROW_PRESS_MS).await;
        dom::set_style(&arrow, "transform", "translateY(-50%) scale(1.1)");
        TimeoutFuture::new(config::ARROW_RELEASE_MS).await;
        dom::set_style(&arrow, "transform", "");
    });
}
