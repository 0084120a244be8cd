//! One-way "reveal on scroll" tracking.
//!
//! Enrolled elements get the `in-view` class the first time they intersect
//! the viewport and are never checked again. Components that care about a
//! particular element's reveal subscribe with [`RevealTracker::watch`].

use std::cell::RefCell;

use web_sys::{Document, HtmlElement};
use yew::Callback;

use crate::config;
use crate::error::{EffectError, EffectResult};
use crate::utils::dom;
use crate::utils::geometry::{is_in_view, Rect};

/// Revealed flags for the enrolled elements, by enrollment index, plus the
/// callbacks waiting on an index to be revealed.
#[derive(Default)]
pub struct RevealSet {
    revealed: Vec<bool>,
    watchers: Vec<(usize, Callback<usize>)>,
}

impl RevealSet {
    #[cfg(test)]
    pub fn new(len: usize) -> Self {
        Self::from_flags(vec![false; len])
    }

    pub fn from_flags(revealed: Vec<bool>) -> Self {
        Self {
            revealed,
            watchers: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Marks `index` revealed. Returns true only on the first call.
    pub fn reveal(&mut self, index: usize) -> bool {
        match self.revealed.get_mut(index) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    /// Checks every element not yet revealed and returns the ones that just
    /// came into view. `rect_of` is only called for unrevealed elements.
    pub fn scan<F>(&mut self, viewport_height: f64, mut rect_of: F) -> Vec<usize>
    where
        F: FnMut(usize) -> Rect,
    {
        let mut newly = Vec::new();
        for index in 0..self.revealed.len() {
            if self.revealed[index] {
                continue;
            }
            if is_in_view(&rect_of(index), viewport_height) {
                self.revealed[index] = true;
                newly.push(index);
            }
        }
        newly
    }

    /// Queues `callback` until `index` is revealed. An already revealed index
    /// hands the callback straight back so the caller can emit it.
    pub fn watch(&mut self, index: usize, callback: Callback<usize>) -> Option<Callback<usize>> {
        if self.is_revealed(index) {
            return Some(callback);
        }
        if index < self.revealed.len() {
            self.watchers.push((index, callback));
        }
        None
    }

    /// Removes and returns the watchers of the given indices.
    pub fn take_due(&mut self, revealed: &[usize]) -> Vec<(usize, Callback<usize>)> {
        if revealed.is_empty() {
            return Vec::new();
        }
        let (due, waiting) = std::mem::take(&mut self.watchers)
            .into_iter()
            .partition(|(index, _)| revealed.contains(index));
        self.watchers = waiting;
        due
    }
}

struct Entry {
    element: HtmlElement,
    fast: bool,
}

pub struct RevealTracker {
    entries: Vec<Entry>,
    state: RefCell<RevealSet>,
}

impl RevealTracker {
    pub fn mount(document: &Document) -> EffectResult<Self> {
        for selector in config::SECTION_TRANSITION_TARGETS {
            if let Ok(Some(el)) = document.query_selector(selector) {
                dom::add_class(&el, config::SECTION_TRANSITION_CLASS);
            }
        }
        if let Ok(Some(el)) = document.query_selector(config::STAGGER_TARGET) {
            dom::add_class(&el, config::STAGGER_CHILDREN_CLASS);
        }

        let entries: Vec<Entry> = dom::query_all(document, config::REVEAL_SELECTOR)
            .into_iter()
            .filter(|el| !dom::is_within(el, config::REVEAL_EXCLUDED_WITHIN))
            .map(|element| Entry {
                fast: dom::is_within(&element, config::FAST_REVEAL_WITHIN),
                element,
            })
            .collect();
        if entries.is_empty() {
            return Err(EffectError::MissingElement(config::REVEAL_SELECTOR));
        }

        let flags = entries
            .iter()
            .map(|entry| dom::has_class(&entry.element, config::IN_VIEW_CLASS))
            .collect();
        let state = RevealSet::from_flags(flags);
        log::debug!("tracking {} reveal targets", state.len());

        Ok(Self {
            entries,
            state: RefCell::new(state),
        })
    }

    pub fn scan(&self, viewport_height: f64) {
        let newly = self
            .state
            .borrow_mut()
            .scan(viewport_height, |index| dom::rect(&self.entries[index].element));
        for &index in &newly {
            self.apply(index);
        }
        self.notify(&newly);
    }

    /// Reveals `element` regardless of its position. Returns false when the
    /// element is not enrolled.
    pub fn force_reveal(&self, element: &HtmlElement) -> bool {
        let Some(index) = self.index_of(element) else {
            return false;
        };
        let newly = self.state.borrow_mut().reveal(index);
        if newly {
            self.apply(index);
            self.notify(&[index]);
        }
        true
    }

    /// Calls `callback` once when `element` is revealed, immediately if it
    /// already is. Returns false when the element is not enrolled.
    pub fn watch(&self, element: &HtmlElement, callback: Callback<HtmlElement>) -> bool {
        let Some(index) = self.index_of(element) else {
            return false;
        };
        let element = element.clone();
        let callback = Callback::from(move |_: usize| callback.emit(element.clone()));
        let ready = self.state.borrow_mut().watch(index, callback);
        if let Some(callback) = ready {
            callback.emit(index);
        }
        true
    }

    fn index_of(&self, element: &HtmlElement) -> Option<usize> {
        self.entries.iter().position(|entry| entry.element == *element)
    }

    fn apply(&self, index: usize) {
        let entry = &self.entries[index];
        dom::add_class(&entry.element, config::IN_VIEW_CLASS);
        if entry.fast {
            dom::set_style(&entry.element, "transition-duration", config::FAST_REVEAL_DURATION);
            for child in dom::query_all_within(&entry.element, config::FAST_REVEAL_DESCENDANTS) {
                dom::set_style(
                    &child,
                    "transition-duration",
                    config::FAST_REVEAL_DESCENDANT_DURATION,
                );
            }
        }
    }

    // Callbacks run after the state borrow is released.
    fn notify(&self, revealed: &[usize]) {
        let due = self.state.borrow_mut().take_due(revealed);
        for (index, callback) in due {
            callback.emit(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    const VIEWPORT: f64 = 800.0;

    // Three stacked 400px elements at the given scroll offset.
    fn layout(scroll: f64) -> impl FnMut(usize) -> Rect {
        move |index| Rect::vertical(index as f64 * 900.0 - scroll, 400.0)
    }

    fn recorder() -> (Rc<RefCell<Vec<usize>>>, Callback<usize>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        (calls, Callback::from(move |index| sink.borrow_mut().push(index)))
    }

    #[test]
    fn reveals_elements_as_they_enter() {
        let mut set = RevealSet::new(3);
        assert_eq!(set.scan(VIEWPORT, layout(0.0)), vec![0]);
        assert_eq!(set.scan(VIEWPORT, layout(900.0)), vec![1]);
        assert_eq!(set.scan(VIEWPORT, layout(1800.0)), vec![2]);
    }

    #[test]
    fn jumping_past_elements_only_reveals_what_is_visible() {
        let mut set = RevealSet::new(3);
        assert_eq!(set.scan(VIEWPORT, layout(1800.0)), vec![2]);
        assert!(!set.is_revealed(0));
        assert!(!set.is_revealed(1));
    }

    #[test]
    fn revealed_flags_never_reset() {
        let mut set = RevealSet::new(3);
        let mut seen = vec![false; 3];
        for scroll in [0.0, 900.0, -500.0, 5000.0, 1800.0, 0.0, 3000.0] {
            set.scan(VIEWPORT, layout(scroll));
            for (index, was) in seen.iter_mut().enumerate() {
                if *was {
                    assert!(set.is_revealed(index), "element {} was hidden again", index);
                }
                *was = set.is_revealed(index);
            }
        }
        assert!(seen.iter().all(|&revealed| revealed));
    }

    #[test]
    fn revealed_elements_are_not_measured_again() {
        let mut set = RevealSet::new(2);
        set.reveal(0);
        let mut measured = Vec::new();
        set.scan(VIEWPORT, |index| {
            measured.push(index);
            Rect::vertical(5000.0, 100.0)
        });
        assert_eq!(measured, vec![1]);
    }

    #[test]
    fn reveal_reports_only_the_first_transition() {
        let mut set = RevealSet::new(1);
        assert!(set.reveal(0));
        assert!(!set.reveal(0));
        assert!(!set.reveal(7));
        assert!(set.is_revealed(0));
    }

    #[test]
    fn preset_flags_are_kept() {
        let mut set = RevealSet::from_flags(vec![true, false]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.scan(VIEWPORT, layout(5000.0)), Vec::<usize>::new());
        assert!(set.is_revealed(0));
    }

    #[test]
    fn late_watcher_is_handed_back_immediately() {
        let mut set = RevealSet::new(2);
        set.reveal(1);
        let (calls, callback) = recorder();

        let ready = set.watch(1, callback).expect("index 1 is already revealed");
        ready.emit(1);
        assert_eq!(*calls.borrow(), vec![1]);
        assert!(set.take_due(&[1]).is_empty());
    }

    #[test]
    fn watcher_fires_once_when_its_element_is_revealed() {
        let mut set = RevealSet::new(3);
        let (calls, callback) = recorder();
        assert!(set.watch(2, callback).is_none());

        let newly = set.scan(VIEWPORT, layout(0.0));
        assert_eq!(newly, vec![0]);
        assert!(set.take_due(&newly).is_empty());

        let newly = set.scan(VIEWPORT, layout(1800.0));
        for (index, callback) in set.take_due(&newly) {
            callback.emit(index);
        }
        assert_eq!(*calls.borrow(), vec![2]);

        // Delivered watchers are gone; a repeated reveal has nothing to run.
        assert!(!set.reveal(2));
        assert!(set.take_due(&[2]).is_empty());
    }

    #[test]
    fn every_watcher_of_an_index_is_delivered() {
        let mut set = RevealSet::new(2);
        let (first, on_first) = recorder();
        let (second, on_second) = recorder();
        let (other, on_other) = recorder();
        set.watch(0, on_first);
        set.watch(0, on_second);
        set.watch(1, on_other);

        assert!(set.reveal(0));
        for (index, callback) in set.take_due(&[0]) {
            callback.emit(index);
        }
        assert_eq!(*first.borrow(), vec![0]);
        assert_eq!(*second.borrow(), vec![0]);
        assert!(other.borrow().is_empty());
        assert_eq!(set.take_due(&[1]).len(), 1);
    }

    #[test]
    fn watching_an_unknown_index_never_fires() {
        let mut set = RevealSet::new(1);
        let (calls, callback) = recorder();
        assert!(set.watch(5, callback).is_none());
        assert!(set.take_due(&[5]).is_empty());
        assert!(calls.borrow().is_empty());
    }
}
