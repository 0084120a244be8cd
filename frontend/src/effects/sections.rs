use std::cell::RefCell;

use web_sys::{Document, HtmlElement};

use crate::config;
use crate::effects::smooth_scroll::SmoothScroller;
use crate::error::{EffectError, EffectResult};
use crate::utils::dom::{self, Listener};
use crate::utils::geometry::{current_section, Rect};

/// Which indicator is lit. A tick where no section qualifies keeps the
/// previous one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndicatorSet {
    len: usize,
    active: Option<usize>,
}

impl IndicatorSet {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            active: (len > 0).then_some(0),
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Returns true when the lit indicator changed.
    pub fn apply(&mut self, current: Option<usize>) -> bool {
        match current {
            Some(index) if index < self.len && self.active != Some(index) => {
                self.active = Some(index);
                true
            }
            _ => false,
        }
    }

    pub fn track(&mut self, rects: &[Rect], viewport_height: f64) -> bool {
        self.apply(current_section(rects, viewport_height))
    }
}

pub struct SectionIndicators {
    sections: Vec<HtmlElement>,
    dots: Vec<HtmlElement>,
    state: RefCell<IndicatorSet>,
    _clicks: Vec<Listener>,
}

impl SectionIndicators {
    pub fn mount(document: &Document, scroller: &SmoothScroller) -> EffectResult<Self> {
        let sections = dom::query_all(document, config::SECTION_SELECTOR);
        if sections.len() <= 1 {
            return Err(EffectError::TooFewElements {
                selector: config::SECTION_SELECTOR,
                found: sections.len(),
            });
        }

        let container = dom::create_div(document, config::INDICATORS_CLASS)?;
        let mut dots = Vec::with_capacity(sections.len());
        let mut clicks = Vec::with_capacity(sections.len());
        for (index, section) in sections.iter().enumerate() {
            let dot = dom::create_div(document, config::INDICATOR_CLASS)?;
            if index == 0 {
                dom::add_class(&dot, config::ACTIVE_CLASS);
            }
            let scroller = scroller.clone();
            let section = section.clone();
            clicks.push(Listener::new(&dot, "click", move |_| scroller.scroll_to(&section))?);
            container.append_child(&dot)?;
            dots.push(dot);
        }
        dom::body(document)?.append_child(&container)?;

        Ok(Self {
            state: RefCell::new(IndicatorSet::new(sections.len())),
            sections,
            dots,
            _clicks: clicks,
        })
    }

    pub fn update(&self, viewport_height: f64) {
        let rects: Vec<Rect> = self.sections.iter().map(|s| dom::rect(s)).collect();
        let mut state = self.state.borrow_mut();
        if !state.track(&rects, viewport_height) {
            return;
        }
        for (index, dot) in self.dots.iter().enumerate() {
            if state.active() == Some(index) {
                dom::add_class(dot, config::ACTIVE_CLASS);
            } else {
                dom::remove_class(dot, config::ACTIVE_CLASS);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_at(scroll: f64) -> Vec<Rect> {
        [(0.0, 500.0), (500.0, 700.0), (1200.0, 400.0)]
            .iter()
            .map(|&(top, height)| Rect::vertical(top - scroll, height))
            .collect()
    }

    #[test]
    fn first_indicator_starts_active() {
        assert_eq!(IndicatorSet::new(3).active(), Some(0));
        assert_eq!(IndicatorSet::new(0).active(), None);
    }

    #[test]
    fn tracks_section_under_threshold() {
        let mut set = IndicatorSet::new(3);
        assert!(set.track(&page_at(400.0), 800.0));
        assert_eq!(set.active(), Some(1));
        assert!(set.track(&page_at(1150.0), 800.0));
        assert_eq!(set.active(), Some(2));
    }

    #[test]
    fn unchanged_section_reports_no_change() {
        let mut set = IndicatorSet::new(3);
        assert!(!set.track(&page_at(0.0), 800.0));
        assert_eq!(set.active(), Some(0));
    }

    #[test]
    fn no_match_leaves_indicator_alone() {
        let mut set = IndicatorSet::new(3);
        set.apply(Some(2));
        assert!(!set.apply(None));
        assert_eq!(set.active(), Some(2));
    }

    #[test]
    fn out_of_range_match_is_ignored() {
        let mut set = IndicatorSet::new(2);
        assert!(!set.apply(Some(5)));
        assert_eq!(set.active(), Some(0));
    }

    #[test]
    fn overlapping_sections_light_the_later_one() {
        let mut set = IndicatorSet::new(2);
        let rects = [Rect::vertical(-100.0, 500.0), Rect::vertical(50.0, 700.0)];
        assert!(set.track(&rects, 800.0));
        assert_eq!(set.active(), Some(1));
    }
}
