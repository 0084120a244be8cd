use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::config;
use crate::error::{EffectError, EffectResult};
use crate::utils::dom;

const TRAVEL_PX: f64 = 30.0;
const SECTION2_DAMPING: f64 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Awards,
    Connect,
    Section2,
}

impl LayerKind {
    pub fn from_element(element: &HtmlElement) -> Option<Self> {
        if dom::has_class(element, config::AWARDS_LAYER_CLASS) {
            Some(LayerKind::Awards)
        } else if dom::has_class(element, config::CONNECT_LAYER_CLASS) {
            Some(LayerKind::Connect)
        } else if dom::has_class(element, config::SECTION2_LAYER_CLASS) {
            Some(LayerKind::Section2)
        } else {
            None
        }
    }

    pub fn transform(self, offset: f64) -> String {
        match self {
            LayerKind::Awards => format!("translateX(-40%) translateY({}px)", offset),
            LayerKind::Connect => format!("translateX(-40%) translateY({}px)", -offset),
            LayerKind::Section2 => format!("translateY({}px)", offset * SECTION2_DAMPING),
        }
    }
}

/// Vertical offset for a layer whose container starts at `top` (document
/// coordinates) and is `height` tall. `None` while the container is off
/// screen.
pub fn layer_offset(scrolled: f64, viewport_height: f64, top: f64, height: f64) -> Option<f64> {
    let in_view = scrolled + viewport_height - top;
    if in_view <= 0.0 || scrolled >= top + height {
        return None;
    }
    let ratio = (in_view / (height + viewport_height)).clamp(0.0, 1.0);
    Some((ratio - 0.5) * TRAVEL_PX)
}

struct Layer {
    element: HtmlElement,
    container: HtmlElement,
    kind: LayerKind,
}

pub struct Parallax {
    layers: Vec<Layer>,
}

impl Parallax {
    pub fn mount(document: &Document) -> EffectResult<Self> {
        let layers: Vec<Layer> = dom::query_all(document, config::PARALLAX_SELECTOR)
            .into_iter()
            .filter_map(|element| {
                let kind = LayerKind::from_element(&element)?;
                let container = element.parent_element()?.dyn_into::<HtmlElement>().ok()?;
                Some(Layer { element, container, kind })
            })
            .collect();
        if layers.is_empty() {
            return Err(EffectError::MissingElement(config::PARALLAX_SELECTOR));
        }
        Ok(Self { layers })
    }

    pub fn update(&self, scrolled: f64, viewport_height: f64) {
        for layer in &self.layers {
            let top = f64::from(layer.container.offset_top());
            let height = f64::from(layer.container.offset_height());
            if let Some(offset) = layer_offset(scrolled, viewport_height, top, height) {
                dom::set_style(&layer.element, "transform", &layer.kind.transform(offset));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_below_viewport_is_skipped() {
        assert_eq!(layer_offset(0.0, 800.0, 1000.0, 600.0), None);
        assert_eq!(layer_offset(200.0, 800.0, 1000.0, 600.0), None);
    }

    #[test]
    fn container_scrolled_past_is_skipped() {
        assert_eq!(layer_offset(1600.0, 800.0, 1000.0, 600.0), None);
    }

    #[test]
    fn offset_runs_from_minus_to_plus_fifteen() {
        // just entering: ratio ~ 0
        let entering = layer_offset(201.0, 800.0, 1000.0, 600.0).unwrap();
        assert!((entering - (-15.0 + 30.0 / 1400.0)).abs() < 1e-9);

        // halfway through its pass
        assert_eq!(layer_offset(900.0, 800.0, 1000.0, 600.0), Some(0.0));

        // about to leave: ratio ~ 1
        let leaving = layer_offset(1599.0, 800.0, 1000.0, 600.0).unwrap();
        assert!(leaving > 14.9 && leaving < 15.0);
    }

    #[test]
    fn layer_transforms() {
        assert_eq!(
            LayerKind::Awards.transform(10.0),
            "translateX(-40%) translateY(10px)"
        );
        assert_eq!(
            LayerKind::Connect.transform(10.0),
            "translateX(-40%) translateY(-10px)"
        );
        assert_eq!(LayerKind::Section2.transform(10.0), "translateY(7px)");
    }
}
