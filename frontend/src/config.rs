// Selectors, class names and timings shared by the page effects.

pub fn log_level() -> log::Level {
    if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Warn
    }
}

pub const ROOT_ID: &str = "page-effects-root";

// Classes written by the effects
pub const ACTIVE_CLASS: &str = "active";
pub const IN_VIEW_CLASS: &str = "in-view";
pub const ANIMATED_CLASS: &str = "animated";
pub const VISIBLE_CLASS: &str = "visible";

// Scroll progress + section indicators
pub const PROGRESS_BAR_CLASS: &str = "scroll-progress";
pub const SECTION_SELECTOR: &str = "section";
pub const INDICATORS_CLASS: &str = "section-indicators";
pub const INDICATOR_CLASS: &str = "indicator";

// Reveal tracking
pub const SECTION_TRANSITION_CLASS: &str = "section-transition";
pub const STAGGER_CHILDREN_CLASS: &str = "stagger-children";
pub const SECTION_TRANSITION_TARGETS: &[&str] = &[
    ".ai-content",
    ".devices-mockup",
    ".testimonial-slider-container",
    ".testimonial-text-content",
];
pub const STAGGER_TARGET: &str = ".content-container";
pub const REVEAL_SELECTOR: &str = ".section-transition, .stagger-children";
pub const REVEAL_EXCLUDED_WITHIN: &str = ".final-cta-section";
pub const FAST_REVEAL_WITHIN: &str = ".ai-automation-section, .awards-section";
pub const FAST_REVEAL_DESCENDANTS: &str = "h2, h3, p, a, img";
pub const FAST_REVEAL_DURATION: &str = "0.7s";
pub const FAST_REVEAL_DESCENDANT_DURATION: &str = "0.6s";
pub const HERO_REVEAL_SELECTOR: &str =
    ".hero-section .section-transition, .hero-section .stagger-children";

// Testimonials
pub const TESTIMONIAL_CARD_SELECTOR: &str = ".testimonial-card";
pub const PREV_ARROW_SELECTOR: &str = ".prev-arrow";
pub const NEXT_ARROW_SELECTOR: &str = ".next-arrow";
pub const SLIDER_CONTAINER_SELECTOR: &str = ".testimonial-slider-container";
pub const SLIDE_EASING: &str = "var(--ease-smooth)";

// Parallax layers
pub const AWARDS_LAYER_CLASS: &str = "awards-bg-image";
pub const CONNECT_LAYER_CLASS: &str = "connect-bg-image";
pub const SECTION2_LAYER_CLASS: &str = "section2-bg-image";
pub const PARALLAX_SELECTOR: &str = ".awards-bg-image, .connect-bg-image, .section2-bg-image";

// Decorative effects
pub const PULSE_LOGO_SELECTOR: &str = ".cyber-logo .logo";
pub const HERO_SECTION_SELECTOR: &str = ".hero-section";
pub const HERO_LOGO_SELECTOR: &str = ".logo-container";
pub const LOGO_SPEED_ATTRIBUTE: &str = "data-speed";
pub const LOGO_BOX_SELECTOR: &str = ".logo-box";
pub const DEVICES_MOCKUP_SELECTOR: &str = ".devices-mockup";
pub const TABLET_MOCKUP_SELECTOR: &str = ".tablet-mockup";
pub const PHONE_MOCKUP_SELECTOR: &str = ".phone-mockup";
pub const PHONE_HEADING_SELECTOR: &str = ".phone-text h3";
pub const PHONE_BODY_SELECTOR: &str = ".phone-text p";
pub const CTA_SELECTORS: &[&str] = &[".final-cta-headline", ".primary-cta-button"];
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

// Timings (milliseconds)
pub const SCROLL_THROTTLE_MS: u32 = 10;
pub const RESIZE_DEBOUNCE_MS: u32 = 100;
pub const SMOOTH_SCROLL_MS: f64 = 1200.0;
pub const SMOOTH_SCROLL_OFFSET_PX: f64 = 30.0;
pub const SLIDE_EXIT_MS: u32 = 400;
pub const SLIDE_ENTER_MS: u32 = 500;
pub const AUTO_ADVANCE_MS: u32 = 6000;
pub const ARROW_PRESS_MS: u32 = 100;
pub const ARROW_RELEASE_MS: u32 = 200;
pub const ANCHOR_PRESS_MS: u32 = 200;
pub const MOCKUP_SETTLE_MS: u32 = 1200;
pub const PHONE_ENTRANCE_DELAY_MS: u32 = 200;
pub const PHONE_TEXT_FALLBACK_MS: u32 = 5000;
