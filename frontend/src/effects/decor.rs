use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{js_sys, Document, HtmlElement, MouseEvent};

use crate::config;
use crate::error::{EffectError, EffectResult};
use crate::utils::dom::{self, Listener};
use crate::utils::geometry::pointer_fraction;

const PULSE_KEYFRAMES: &str = r#"
    @keyframes pulse {
        0% { transform: scale(1); }
        100% { transform: scale(1.1); }
    }
"#;

const LOGO_TRAVEL_PX: f64 = 15.0;

/// Crops the cyber logo and gives it a slow breathing animation.
pub fn mount_logo_pulse(document: &Document) -> EffectResult<()> {
    let logo = dom::query(document, config::PULSE_LOGO_SELECTOR)?;
    dom::set_style(&logo, "clip-path", "inset(0% 0% 35% 0%)");
    dom::set_style(&logo, "animation", "pulse 3s infinite alternate ease-in-out");

    let style = document.create_element("style")?;
    style.set_text_content(Some(PULSE_KEYFRAMES));
    document
        .head()
        .ok_or(EffectError::MissingElement("head"))?
        .append_child(&style)?;
    Ok(())
}

/// Parses a `data-speed` value; anything that is not a finite number is
/// treated as absent.
pub fn parse_speed(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|speed| speed.is_finite())
}

/// A random speed in [0.02, 0.05) for logos without `data-speed`.
pub fn fallback_speed(unit: f64) -> f64 {
    unit * 0.03 + 0.02
}

pub fn logo_offset(fraction: (f64, f64), speed: f64) -> (f64, f64) {
    (
        fraction.0 * LOGO_TRAVEL_PX * speed,
        fraction.1 * LOGO_TRAVEL_PX * speed,
    )
}

struct HeroLogo {
    element: HtmlElement,
    speed: f64,
}

/// Hero logos drift with the pointer.
pub struct HeroLogos {
    _listeners: Vec<Listener>,
}

impl HeroLogos {
    pub fn mount(document: &Document) -> EffectResult<Self> {
        let hero = dom::query(document, config::HERO_SECTION_SELECTOR)?;
        let logos: Rc<Vec<HeroLogo>> = Rc::new(
            dom::query_all(document, config::HERO_LOGO_SELECTOR)
                .into_iter()
                .map(|element| {
                    let speed = parse_speed(
                        element.get_attribute(config::LOGO_SPEED_ATTRIBUTE).as_deref(),
                    )
                    .unwrap_or_else(|| fallback_speed(js_sys::Math::random()));
                    HeroLogo { element, speed }
                })
                .collect(),
        );
        if logos.is_empty() {
            return Err(EffectError::MissingElement(config::HERO_LOGO_SELECTOR));
        }

        let on_move = {
            let logos = logos.clone();
            let section = hero.clone();
            Listener::new(&hero, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else { return };
                let fraction = pointer_fraction(
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                    &dom::rect(&section),
                );
                for logo in logos.iter() {
                    let (x, y) = logo_offset(fraction, logo.speed);
                    let transform = format!("translate({}px, {}px)", x, y);
                    dom::set_style(&logo.element, "transform", &transform);
                }
            })?
        };
        let on_leave = Listener::new(&hero, "mouseleave", move |_| {
            for logo in logos.iter() {
                dom::set_style(&logo.element, "transform", "");
            }
        })?;

        Ok(Self {
            _listeners: vec![on_move, on_leave],
        })
    }
}
