use web_sys::{Document, HtmlElement};

use crate::config;
use crate::error::EffectResult;
use crate::utils::dom;

/// Share of the scrollable distance already covered, in [0, 100].
pub fn scroll_percent(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

pub struct ProgressBar {
    bar: HtmlElement,
}

impl ProgressBar {
    pub fn mount(document: &Document) -> EffectResult<Self> {
        let bar = dom::create_div(document, config::PROGRESS_BAR_CLASS)?;
        dom::body(document)?.append_child(&bar)?;
        Ok(Self { bar })
    }

    pub fn update(&self, scroll_top: f64, document_height: f64, viewport_height: f64) {
        let percent = scroll_percent(scroll_top, document_height, viewport_height);
        dom::set_style(&self.bar, "width", &format!("{}%", percent));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halfway_down_is_fifty_percent() {
        assert_eq!(scroll_percent(1000.0, 2800.0, 800.0), 50.0);
    }

    #[test]
    fn top_and_bottom_of_page() {
        assert_eq!(scroll_percent(0.0, 2800.0, 800.0), 0.0);
        assert_eq!(scroll_percent(2000.0, 2800.0, 800.0), 100.0);
    }

    #[test]
    fn page_shorter_than_viewport_reports_zero() {
        assert_eq!(scroll_percent(0.0, 600.0, 800.0), 0.0);
        assert_eq!(scroll_percent(0.0, 800.0, 800.0), 0.0);
    }

    #[test]
    fn overscroll_bounce_is_clamped() {
        assert_eq!(scroll_percent(-40.0, 2800.0, 800.0), 0.0);
        assert_eq!(scroll_percent(2100.0, 2800.0, 800.0), 100.0);
    }
}
