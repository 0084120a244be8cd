use std::rc::Rc;

use web_sys::Document;
use yew::prelude::*;

use crate::config;
use crate::effects::carousel::Carousel;
use crate::effects::decor::{self, HeroLogos};
use crate::effects::devices::DeviceMockups;
use crate::effects::parallax::Parallax;
use crate::effects::progress::ProgressBar;
use crate::effects::reveal::RevealTracker;
use crate::effects::sections::SectionIndicators;
use crate::effects::smooth_scroll::{AnchorLinks, SmoothScroller};
use crate::error::{optional, EffectResult};
use crate::utils::dom::{self, Listener};
use crate::utils::timing::{Debounce, Throttle};

/// Everything recomputed on a scroll tick.
struct ScrollDriven {
    document: Document,
    progress: Option<ProgressBar>,
    sections: Option<SectionIndicators>,
    reveal: Option<Rc<RevealTracker>>,
    parallax: Option<Parallax>,
}

impl ScrollDriven {
    fn tick(&self) {
        let Ok(window) = dom::window() else { return };
        let viewport_height = dom::viewport_height(&window);
        let scroll_top = dom::scroll_top(&window);

        if let Some(progress) = &self.progress {
            progress.update(scroll_top, dom::document_height(&self.document), viewport_height);
        }
        if let Some(sections) = &self.sections {
            sections.update(viewport_height);
        }
        if let Some(reveal) = &self.reveal {
            reveal.scan(viewport_height);
        }
        if let Some(parallax) = &self.parallax {
            parallax.update(scroll_top, viewport_height);
        }
    }
}

/// Owns every installed behavior; dropping it unhooks the listeners.
pub struct Effects {
    _carousel: Option<Carousel>,
    _anchors: Option<AnchorLinks>,
    _hero_logos: Option<HeroLogos>,
    _devices: Option<DeviceMockups>,
    _listeners: Vec<Listener>,
}

impl Effects {
    pub fn install() -> EffectResult<Self> {
        let window = dom::window()?;
        let document = dom::document()?;
        let scroller = SmoothScroller::new();

        let progress = optional("scroll progress", ProgressBar::mount(&document));
        let sections = optional(
            "section indicators",
            SectionIndicators::mount(&document, &scroller),
        );
        let reveal = optional("reveal tracker", RevealTracker::mount(&document)).map(Rc::new);
        let carousel = optional("testimonial carousel", Carousel::mount(&document));
        let anchors = optional("anchor links", AnchorLinks::mount(&document, &scroller));
        let parallax = optional("parallax", Parallax::mount(&document));
        optional("logo pulse", decor::mount_logo_pulse(&document));
        let hero_logos = optional("hero logos", HeroLogos::mount(&document));
        let devices = optional(
            "device mockups",
            DeviceMockups::mount(&document, reveal.as_deref()),
        );

        if let Some(reveal) = &reveal {
            reveal.scan(dom::viewport_height(&window));
        }

        let driven = Rc::new(ScrollDriven {
            document: document.clone(),
            progress,
            sections,
            reveal: reveal.clone(),
            parallax,
        });

        let mut listeners = Vec::new();
        let throttle = Throttle::new(config::SCROLL_THROTTLE_MS);
        listeners.push(Listener::new(&window, "scroll", move |_| {
            let driven = driven.clone();
            throttle.trigger(move || driven.tick());
        })?);

        if let Some(reveal) = reveal.clone() {
            let debounce = Debounce::new(config::RESIZE_DEBOUNCE_MS);
            listeners.push(Listener::new(&window, "resize", move |_| {
                let reveal = reveal.clone();
                debounce.trigger(move || {
                    if let Ok(window) = dom::window() {
                        reveal.scan(dom::viewport_height(&window));
                    }
                });
            })?);
        }

        let on_load = {
            let document = document.clone();
            move || finish_loading(&document, reveal.as_deref())
        };
        if document.ready_state() == "complete" {
            on_load();
        } else {
            let mut pending = Some(on_load);
            listeners.push(Listener::new(&window, "load", move |_| {
                if let Some(on_load) = pending.take() {
                    on_load();
                }
            })?);
        }

        Ok(Self {
            _carousel: carousel,
            _anchors: anchors,
            _hero_logos: hero_logos,
            _devices: devices,
            _listeners: listeners,
        })
    }
}

fn logo_delay(index: usize) -> String {
    format!("{:.1}s", 0.1 * index as f64 + 0.3)
}

/// One-time adjustments once every page resource has loaded.
fn finish_loading(document: &Document, reveal: Option<&RevealTracker>) {
    for selector in config::CTA_SELECTORS {
        if let Ok(cta) = dom::query(document, *selector) {
            dom::set_style(&cta, "opacity", "1");
            dom::set_style(&cta, "transform", "none");
        }
    }

    let Ok(window) = dom::window() else { return };
    if let Some(reveal) = reveal {
        reveal.scan(dom::viewport_height(&window));
    }

    for element in dom::query_all(document, config::HERO_REVEAL_SELECTOR) {
        let tracked = reveal.map_or(false, |tracker| tracker.force_reveal(&element));
        if !tracked {
            dom::add_class(&element, config::IN_VIEW_CLASS);
        }
    }

    for (index, logo) in dom::query_all(document, config::LOGO_BOX_SELECTOR)
        .iter()
        .enumerate()
    {
        dom::set_style(logo, "animation-delay", &logo_delay(index));
    }
    log::debug!("page load adjustments applied");
}

/// Invisible component that installs the page behaviors on mount.
#[function_component(PageEffects)]
pub fn page_effects() -> Html {
    use_effect_with_deps(
        move |_| {
            let effects = match Effects::install() {
                Ok(effects) => Some(effects),
                Err(e) => {
                    log::warn!("Page effects unavailable: {}", e);
                    None
                }
            };
            move || drop(effects)
        },
        (),
    );

    html! {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_delays_are_staggered() {
        assert_eq!(logo_delay(0), "0.3s");
        assert_eq!(logo_delay(1), "0.4s");
        assert_eq!(logo_delay(3), "0.6s");
    }
}
