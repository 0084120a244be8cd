//! Viewport intersection math over bounding-rect snapshots.
//!
//! Everything here is DOM-free: callers take a `Rect` from
//! `getBoundingClientRect` and pass the current viewport height.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rect with only vertical extent, which is all most checks need.
    #[cfg(test)]
    pub fn vertical(top: f64, height: f64) -> Self {
        Self {
            left: 0.0,
            top,
            width: 0.0,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// How far into the viewport an element must reach before it counts as seen.
pub fn reveal_threshold(height: f64) -> f64 {
    (height * 0.15).min(100.0)
}

pub fn is_in_view(rect: &Rect, viewport_height: f64) -> bool {
    let threshold = reveal_threshold(rect.height);
    (rect.top <= viewport_height - threshold && rect.bottom() >= 0.0)
        || (rect.top <= viewport_height && rect.bottom() >= threshold)
}

pub fn section_threshold(height: f64, viewport_height: f64) -> f64 {
    (0.25 * height).min(viewport_height * 0.5)
}

pub fn is_current_section(rect: &Rect, viewport_height: f64) -> bool {
    let threshold = section_threshold(rect.height, viewport_height);
    rect.top <= threshold && rect.top + rect.height > threshold
}

/// Index of the section the reader is in. Later sections win ties.
pub fn current_section(rects: &[Rect], viewport_height: f64) -> Option<usize> {
    rects
        .iter()
        .enumerate()
        .filter(|(_, rect)| is_current_section(rect, viewport_height))
        .map(|(index, _)| index)
        .last()
}

/// Pointer position relative to the rect's center, each axis in [-0.5, 0.5]
/// while the pointer is inside the rect.
pub fn pointer_fraction(client_x: f64, client_y: f64, rect: &Rect) -> (f64, f64) {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return (0.0, 0.0);
    }
    (
        (client_x - rect.left) / rect.width - 0.5,
        (client_y - rect.top) / rect.height - 0.5,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // Section rects as seen from a given scroll offset.
    fn sections_at(scroll: f64) -> Vec<Rect> {
        [(0.0, 500.0), (500.0, 700.0), (1200.0, 400.0)]
            .iter()
            .map(|&(top, height)| Rect::vertical(top - scroll, height))
            .collect()
    }

    #[test]
    fn reveal_threshold_caps_at_100px() {
        assert_eq!(reveal_threshold(200.0), 30.0);
        assert_eq!(reveal_threshold(2000.0), 100.0);
    }

    #[test]
    fn element_below_fold_is_not_in_view() {
        assert!(!is_in_view(&Rect::vertical(900.0, 300.0), 800.0));
    }

    #[test]
    fn element_touching_bottom_edge_counts_as_in_view() {
        // fails the first clause (780 > 755) but satisfies the second
        assert!(is_in_view(&Rect::vertical(780.0, 300.0), 800.0));
    }

    #[test]
    fn element_past_threshold_is_in_view() {
        assert!(is_in_view(&Rect::vertical(700.0, 300.0), 800.0));
    }

    #[test]
    fn element_scrolled_above_is_not_in_view() {
        assert!(!is_in_view(&Rect::vertical(-400.0, 300.0), 800.0));
    }

    #[test]
    fn tall_element_straddling_viewport_is_in_view() {
        assert!(is_in_view(&Rect::vertical(-1000.0, 3000.0), 800.0));
    }

    #[test]
    fn section_threshold_uses_smaller_bound() {
        assert_eq!(section_threshold(500.0, 800.0), 125.0);
        assert_eq!(section_threshold(4000.0, 800.0), 400.0);
    }

    #[test]
    fn first_section_is_current_at_top_of_page() {
        assert_eq!(current_section(&sections_at(0.0), 800.0), Some(0));
    }

    #[test]
    fn second_section_becomes_current_once_it_crosses_threshold() {
        // tops [-400, 100, 800]: only section 1 has top <= 175 < bottom
        assert_eq!(current_section(&sections_at(400.0), 800.0), Some(1));
    }

    #[test]
    fn last_section_becomes_current_near_bottom() {
        // tops [-1150, -650, 50]: section 2 threshold = 100
        assert_eq!(current_section(&sections_at(1150.0), 800.0), Some(2));
    }

    #[test]
    fn later_match_wins_when_two_sections_qualify() {
        let rects = [Rect::vertical(-100.0, 500.0), Rect::vertical(50.0, 700.0)];
        assert!(is_current_section(&rects[0], 800.0));
        assert!(is_current_section(&rects[1], 800.0));
        assert_eq!(current_section(&rects, 800.0), Some(1));
    }

    #[test]
    fn no_section_matches_in_a_gap() {
        let rects = [Rect::vertical(-600.0, 500.0), Rect::vertical(300.0, 400.0)];
        assert_eq!(current_section(&rects, 800.0), None);
    }

    #[test]
    fn pointer_fraction_is_centered() {
        let rect = Rect::new(100.0, 50.0, 400.0, 200.0);
        assert_eq!(pointer_fraction(300.0, 150.0, &rect), (0.0, 0.0));
        assert_eq!(pointer_fraction(100.0, 250.0, &rect), (-0.5, 0.5));
    }

    #[test]
    fn pointer_fraction_ignores_empty_rect() {
        assert_eq!(pointer_fraction(10.0, 10.0, &Rect::default()), (0.0, 0.0));
    }
}
