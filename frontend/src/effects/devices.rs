use std::cell::Cell;

use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlElement};
use yew::Callback;

use crate::config;
use crate::effects::reveal::RevealTracker;
use crate::error::EffectResult;
use crate::utils::dom;

const TABLET_HIDDEN: &str = "translateY(-200px) translateX(100px) rotate(-15deg) scale(0.8)";
const PHONE_HIDDEN: &str = "translateY(200px) translateX(-100px) rotate(15deg) scale(0.8)";
const TABLET_SETTLED: &str = "translateY(0) translateX(0) rotate(-2deg) scale(1)";
const PHONE_SETTLED: &str = "translateY(0) translateX(0) rotate(2deg) scale(1)";
const ENTRANCE_TRANSITION: &str =
    "opacity 1s var(--ease-out-expo), transform 1.2s var(--ease-out-back)";

#[derive(Clone)]
struct Mockups {
    tablet: Option<HtmlElement>,
    phone: Option<HtmlElement>,
    heading: Option<HtmlElement>,
    body: Option<HtmlElement>,
}

impl Mockups {
    fn show_phone_text(&self) {
        if let Some(heading) = &self.heading {
            dom::set_style(heading, "opacity", "1");
        }
        if let Some(body) = &self.body {
            dom::set_style(body, "opacity", "0.9");
        }
    }

    fn hide_devices(&self) {
        if let Some(tablet) = &self.tablet {
            dom::set_style(tablet, "opacity", "0");
            dom::set_style(tablet, "transform", TABLET_HIDDEN);
        }
        if let Some(phone) = &self.phone {
            dom::set_style(phone, "opacity", "0");
            dom::set_style(phone, "transform", PHONE_HIDDEN);
        }
    }

    fn play_entrance(&self) {
        if let Some(tablet) = self.tablet.clone() {
            spawn_local(async move {
                settle(&tablet, TABLET_SETTLED).await;
            });
        }
        if let Some(phone) = self.phone.clone() {
            spawn_local(async move {
                TimeoutFuture::new(config::PHONE_ENTRANCE_DELAY_MS).await;
                settle(&phone, PHONE_SETTLED).await;
            });
        }
        if let (Some(heading), Some(body)) = (&self.heading, &self.body) {
            dom::add_class(heading, config::VISIBLE_CLASS);
            dom::add_class(body, config::VISIBLE_CLASS);
            dom::set_style(heading, "opacity", "1");
            dom::set_style(heading, "transform", "translateY(0)");
            dom::set_style(body, "opacity", "0.9");
            dom::set_style(body, "transform", "translateY(0)");
        }
    }
}

/// Callback that runs `action` on its first emit and ignores the rest.
fn play_once<T: 'static>(action: impl Fn() + 'static) -> Callback<T> {
    let played = Cell::new(false);
    Callback::from(move |_: T| {
        if !played.replace(true) {
            action();
        }
    })
}

async fn settle(device: &HtmlElement, transform: &str) {
    dom::set_style(device, "transition", ENTRANCE_TRANSITION);
    dom::set_style(device, "opacity", "1");
    dom::set_style(device, "transform", transform);
    TimeoutFuture::new(config::MOCKUP_SETTLE_MS).await;
    dom::add_class(device, config::ANIMATED_CLASS);
}

/// Tablet and phone mockups that fly in when their section is revealed.
pub struct DeviceMockups {
    _fallback: Timeout,
}

impl DeviceMockups {
    pub fn mount(document: &Document, reveal: Option<&RevealTracker>) -> EffectResult<Self> {
        let container = dom::query(document, config::DEVICES_MOCKUP_SELECTOR)?;
        let mockups = Mockups {
            tablet: dom::query(document, config::TABLET_MOCKUP_SELECTOR).ok(),
            phone: dom::query(document, config::PHONE_MOCKUP_SELECTOR).ok(),
            heading: dom::query(document, config::PHONE_HEADING_SELECTOR).ok(),
            body: dom::query(document, config::PHONE_BODY_SELECTOR).ok(),
        };
        mockups.hide_devices();
        mockups.show_phone_text();

        let entrance = {
            let mockups = mockups.clone();
            play_once::<HtmlElement>(move || mockups.play_entrance())
        };
        let watched = reveal.map_or(false, |tracker| tracker.watch(&container, entrance.clone()));
        if !watched {
            // Nothing will report the reveal, so don't leave the devices hidden.
            entrance.emit(container);
        }

        // Phone text must end up readable even if the entrance never runs.
        let fallback = Timeout::new(config::PHONE_TEXT_FALLBACK_MS, move || {
            mockups.show_phone_text();
        });

        Ok(Self { _fallback: fallback })
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    #[test]
    fn entrance_plays_only_on_first_emit() {
        let plays = Rc::new(Cell::new(0));
        let counter = plays.clone();
        let entrance = play_once::<usize>(move || counter.set(counter.get() + 1));

        entrance.emit(0);
        entrance.emit(0);
        entrance.clone().emit(3);
        assert_eq!(plays.get(), 1);
    }

    #[test]
    fn separate_guards_do_not_share_state() {
        let plays = Rc::new(Cell::new(0));
        let first = {
            let plays = plays.clone();
            play_once::<()>(move || plays.set(plays.get() + 1))
        };
        let second = {
            let plays = plays.clone();
            play_once::<()>(move || plays.set(plays.get() + 1))
        };
        first.emit(());
        second.emit(());
        first.emit(());
        assert_eq!(plays.get(), 2);
    }
}
