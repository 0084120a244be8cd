use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList, Window};

use crate::error::{EffectError, EffectResult};
use crate::utils::geometry::Rect;

pub fn window() -> EffectResult<Window> {
    web_sys::window().ok_or(EffectError::NoWindow)
}

pub fn document() -> EffectResult<Document> {
    window()?.document().ok_or(EffectError::NoDocument)
}

pub fn body(document: &Document) -> EffectResult<HtmlElement> {
    document.body().ok_or(EffectError::MissingElement("body"))
}

/// First element matching `selector`, or `MissingElement`.
pub fn query(document: &Document, selector: &'static str) -> EffectResult<HtmlElement> {
    document
        .query_selector(selector)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or(EffectError::MissingElement(selector))
}

pub fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    match document.query_selector_all(selector) {
        Ok(list) => html_elements(&list),
        Err(e) => {
            log::warn!("querySelectorAll({}) failed: {:?}", selector, e);
            Vec::new()
        }
    }
}

pub fn query_all_within(parent: &Element, selector: &str) -> Vec<HtmlElement> {
    parent
        .query_selector_all(selector)
        .map(|list| html_elements(&list))
        .unwrap_or_default()
}

fn html_elements(list: &NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn is_within(element: &Element, selector: &str) -> bool {
    matches!(element.closest(selector), Ok(Some(_)))
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        log::trace!("could not set {}: {:?}", property, e);
    }
}

pub fn add_class(element: &Element, class: &str) {
    let _ = element.class_list().add_1(class);
}

pub fn remove_class(element: &Element, class: &str) {
    let _ = element.class_list().remove_1(class);
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

pub fn create_div(document: &Document, class: &str) -> EffectResult<HtmlElement> {
    let element = document.create_element("div")?;
    element.set_class_name(class);
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| EffectError::Js(format!("<div class=\"{}\"> is not an HtmlElement", class)))
}

pub fn rect(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

pub fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

pub fn scroll_top(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn document_height(document: &Document) -> f64 {
    document
        .document_element()
        .map(|root| root.scroll_height() as f64)
        .unwrap_or(0.0)
}

/// Reads layout so pending style writes are applied before the next ones.
pub fn force_layout(element: &HtmlElement) {
    let _ = element.offset_width();
}

/// An event listener that stays registered until dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> EffectResult<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}
